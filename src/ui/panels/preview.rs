// PlantCare - ui/panels/preview.rs
//
// Left column: the selected image and the Generate / Upload Different
// Image buttons.

use crate::app::state::AppState;
use crate::core::preview::Preview;
use crate::ui::{theme, UiAction};

/// GPU texture for the current preview, re-created when the preview URI changes.
#[derive(Default)]
pub struct PreviewTexture {
    uri: Option<String>,
    handle: Option<egui::TextureHandle>,
}

impl PreviewTexture {
    /// Bring the texture in line with `preview` and return it.
    pub fn sync(
        &mut self,
        ctx: &egui::Context,
        preview: Option<&Preview>,
    ) -> Option<&egui::TextureHandle> {
        let Some(preview) = preview else {
            self.uri = None;
            self.handle = None;
            return None;
        };

        if self.uri.as_deref() != Some(preview.uri.as_str()) {
            self.handle = preview.image.as_ref().map(|img| {
                let colour = egui::ColorImage::from_rgba_unmultiplied(
                    [img.width as usize, img.height as usize],
                    &img.rgba,
                );
                ctx.load_texture(&preview.uri, colour, egui::TextureOptions::LINEAR)
            });
            self.uri = Some(preview.uri.clone());
            tracing::debug!(uri = %preview.uri, loaded = self.handle.is_some(), "Preview texture updated");
        }

        self.handle.as_ref()
    }
}

/// Render the preview column.
pub fn render(
    ui: &mut egui::Ui,
    state: &AppState,
    texture: Option<&egui::TextureHandle>,
    actions: &mut Vec<UiAction>,
) {
    ui.vertical_centered(|ui| {
        match texture {
            Some(tex) => {
                ui.add(
                    egui::Image::from_texture(egui::load::SizedTexture::from_handle(tex))
                        .max_width(ui.available_width())
                        .max_height(theme::PREVIEW_MAX_HEIGHT),
                );
            }
            None => {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.set_min_height(theme::PREVIEW_MAX_HEIGHT * 0.5);
                    ui.vertical_centered(|ui| {
                        ui.add_space(theme::PREVIEW_MAX_HEIGHT * 0.2);
                        ui.label(egui::RichText::new("Preview unavailable").color(theme::MUTED));
                        ui.label(
                            egui::RichText::new("The image can still be analyzed.")
                                .small()
                                .weak(),
                        );
                    });
                });
            }
        }

        if let Some(file) = &state.selected_file {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} \u{00b7} {}",
                    file.file_name,
                    format_size(file.len())
                ))
                .small()
                .weak(),
            );
        }

        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if state.can_submit() {
                let generate = egui::Button::new(
                    egui::RichText::new("\u{27f3}  Generate Article").color(egui::Color32::WHITE),
                )
                .fill(theme::ACCENT)
                .min_size(egui::vec2(180.0, 36.0));
                if ui.add(generate).clicked() {
                    actions.push(UiAction::Submit);
                }
            }

            let reset = egui::Button::new("Upload Different Image").min_size(egui::vec2(180.0, 36.0));
            if ui.add(reset).clicked() {
                actions.push(UiAction::Reset);
            }
        });
    });
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
