// PlantCare - ui/panels/upload.rs
//
// Drop zone shown while no image is selected.

use crate::ui::{theme, UiAction};

/// Render the upload prompt. Clicking "Select Image" raises `PickImage`;
/// drag-and-drop is handled window-wide in gui.rs.
pub fn render(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

    let mut frame = egui::Frame::group(ui.style());
    if hovering {
        frame = frame.stroke(egui::Stroke::new(2.0, theme::ACCENT));
    }

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(theme::DROP_ZONE_MIN_HEIGHT);
        ui.vertical_centered(|ui| {
            ui.add_space(theme::DROP_ZONE_MIN_HEIGHT * 0.25);
            ui.label(egui::RichText::new("\u{2b06}").size(36.0).color(theme::ACCENT));
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Upload your image").size(22.0).strong());
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(
                    "JPG works best. The AI will analyze the image and come with \
                     insights into how to take care of the plant.",
                )
                .color(theme::MUTED),
            );
            ui.add_space(16.0);

            let button = egui::Button::new(
                egui::RichText::new("Select Image")
                    .size(16.0)
                    .color(egui::Color32::WHITE),
            )
            .fill(theme::ACCENT)
            .min_size(egui::vec2(160.0, 40.0));
            if ui.add(button).clicked() {
                actions.push(UiAction::PickImage);
            }

            ui.add_space(8.0);
            ui.label(egui::RichText::new("or drop an image file here").small().weak());
        });
    });
}
