// PlantCare - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models), egui.
// Must NOT depend on: platform, direct I/O.
//
// Panels never act on their own; they push a UiAction and gui.rs carries
// it out after the frame's layout is done.

use crate::core::export::ExportFormat;

pub mod markdown;
pub mod panels;
pub mod theme;

/// A user request raised by a panel during this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Open the native image picker.
    PickImage,
    /// Send the selected image to the service.
    Submit,
    /// Drop the image and everything derived from it.
    Reset,
    /// Copy the article markdown to the clipboard.
    CopyArticle,
    /// Save the article to a file.
    Export(ExportFormat),
}
