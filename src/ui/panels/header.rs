// PlantCare - ui/panels/header.rs

use crate::ui::theme;

/// Render the page title and tagline.
pub fn render(ui: &mut egui::Ui) {
    let dark = ui.visuals().dark_mode;
    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("Plant care instructions")
                .size(34.0)
                .strong()
                .color(theme::title_colour(dark)),
        );
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Upload an image of a plant to find more information about it.")
                .color(theme::MUTED),
        );
    });
    ui.add_space(20.0);
}
