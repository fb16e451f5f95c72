// PlantCare - ui/panels/result.rs
//
// Right column: one of spinner, error, placeholder, or the rendered article,
// chosen by AppState::display_mode.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::core::model::DisplayMode;
use crate::ui::{markdown, theme, UiAction};

/// Render the result column.
pub fn render(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    match state.display_mode() {
        DisplayMode::Loading => centred(ui, |ui| {
            ui.add(egui::Spinner::new().size(theme::SPINNER_SIZE).color(theme::ACCENT));
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Analyzing image...").size(18.0).strong());
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(
                    "Running CNN Model \u{2022} Searching Tavily \u{2022} Generating Text",
                )
                .color(theme::MUTED),
            );
        }),
        DisplayMode::Error => centred(ui, |ui| {
            ui.label(egui::RichText::new("\u{26a0}").size(40.0).color(theme::ERROR));
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Something went wrong")
                    .size(18.0)
                    .strong()
                    .color(theme::ERROR),
            );
            ui.add_space(6.0);
            if let Some(error) = &state.error {
                ui.label(egui::RichText::new(error).color(theme::ERROR_SOFT));
            }
        }),
        DisplayMode::Placeholder => centred(ui, |ui| {
            ui.label(egui::RichText::new("\u{1f5bc}").size(48.0).color(theme::MUTED));
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Click \"Generate Article\" to process this image.")
                    .size(16.0)
                    .color(theme::MUTED),
            );
        }),
        DisplayMode::Article => {
            ui.horizontal(|ui| {
                if ui.small_button("Copy markdown").clicked() {
                    actions.push(UiAction::CopyArticle);
                }
                for format in [ExportFormat::Markdown, ExportFormat::Html] {
                    if ui
                        .small_button(format!("Save as {}\u{2026}", format.label()))
                        .clicked()
                    {
                        actions.push(UiAction::Export(format));
                    }
                }
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .id_salt("article_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    markdown::render(ui, &state.document);
                });
        }
        // The upload drop zone replaces both columns; nothing to draw here.
        DisplayMode::Upload => {}
    }
}

fn centred(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.set_min_height(theme::RESULT_MIN_HEIGHT);
    ui.vertical_centered(|ui| {
        ui.add_space(theme::RESULT_MIN_HEIGHT * 0.3);
        add_contents(ui);
    });
}
