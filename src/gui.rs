// PlantCare - gui.rs
//
// Top-level eframe::App implementation.
// Wires the panels together, carries out their actions, and drains the
// predict channel every frame.

use crate::app::predict::PredictManager;
use crate::app::session::{self, SessionData};
use crate::app::state::AppState;
use crate::core::export::{self, ExportFormat};
use crate::core::model::{PredictProgress, SelectedImage};
use crate::platform::config::AppConfig;
use crate::ui::panels::preview::PreviewTexture;
use crate::ui::{self, UiAction};
use crate::util::constants;
use crate::util::error::ExportError;
use std::path::{Path, PathBuf};

/// The PlantCare application.
pub struct PlantCareApp {
    pub state: AppState,
    pub predict_manager: PredictManager,
    config: AppConfig,
    session: SessionData,
    session_path: PathBuf,
    preview_texture: PreviewTexture,
    theme_applied: Option<bool>,
}

impl PlantCareApp {
    pub fn new(
        state: AppState,
        predict_manager: PredictManager,
        config: AppConfig,
        session: SessionData,
        session_path: PathBuf,
    ) -> Self {
        Self {
            state,
            predict_manager,
            config,
            session,
            session_path,
            preview_texture: PreviewTexture::default(),
            theme_applied: None,
        }
    }

    fn dark_mode(&self) -> bool {
        self.session.dark_mode.unwrap_or(self.config.dark_mode)
    }

    fn save_session(&self) {
        if let Err(e) = session::save(&self.session, &self.session_path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// Load `path` and make it the current selection.
    fn open_image(&mut self, path: &Path) {
        match SelectedImage::load(path) {
            Ok(image) => {
                self.remember_dir(path);
                self.state.select_file(image);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot open image");
                self.state.status_message = e.to_string();
            }
        }
    }

    fn remember_dir(&mut self, path: &Path) {
        let dir = path.parent().map(Path::to_path_buf);
        if dir.is_some() && dir != self.session.last_image_dir {
            self.session.last_image_dir = dir;
            self.save_session();
        }
    }

    fn pick_image(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select a plant photo")
            .add_filter("Images", constants::SUPPORTED_IMAGE_EXTENSIONS);
        if let Some(dir) = &self.session.last_image_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_image(&path);
        }
    }

    fn submit(&mut self) {
        if let Some(request) = self.state.begin_submit() {
            tracing::debug!(request_id = request.id, "Submitting");
            self.predict_manager.submit(request);
        }
    }

    fn export(&mut self, format: ExportFormat) {
        if self.state.prediction.trim().is_empty() {
            self.state.status_message = format!("Export failed: {}", ExportError::NothingToExport);
            return;
        }
        let file_name = export::suggested_file_name(&self.state.document, format);
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        let result =
            export::export_to_file(&self.state.prediction, format, chrono::Local::now(), &dest);
        self.state.status_message = match result {
            Ok(bytes) => {
                tracing::info!(path = %dest.display(), bytes, "Article exported");
                format!("Saved {} ({bytes} bytes).", dest.display())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("Export failed: {e}")
            }
        };
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::PickImage => self.pick_image(),
            UiAction::Submit => self.submit(),
            UiAction::Reset => self.state.reset(),
            UiAction::CopyArticle => {
                ctx.copy_text(self.state.prediction.clone());
                self.state.status_message = "Article copied to clipboard.".to_string();
            }
            UiAction::Export(format) => self.export(format),
        }
    }

    /// Take the first dropped file that has a path or in-memory bytes.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.open_image(&path);
        } else if let Some(bytes) = file.bytes {
            match SelectedImage::from_bytes_checked(PathBuf::from(file.name), bytes.to_vec()) {
                Ok(image) => self.state.select_file(image),
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected dropped image");
                    self.state.status_message = e.to_string();
                }
            }
        }
    }
}

impl eframe::App for PlantCareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dark = self.dark_mode();
        if self.theme_applied != Some(dark) {
            ui::theme::apply(ctx, dark, self.config.font_size);
            self.theme_applied = Some(dark);
        }

        // Poll for finished requests.
        for msg in self.predict_manager.poll_progress() {
            let request_id = msg.request_id();
            let outcome = match msg {
                PredictProgress::Completed { article, .. } => Ok(article),
                PredictProgress::Failed { error, .. } => Err(error),
            };
            self.state.finish_submit(request_id, outcome);
        }
        // Keep repainting while a request runs so the result appears promptly.
        if self.state.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                constants::PREDICT_POLL_INTERVAL_MS,
            ));
        }

        self.handle_dropped_files(ctx);

        let mut actions: Vec<UiAction> = Vec::new();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image\u{2026}").clicked() {
                        actions.push(UiAction::PickImage);
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_article = !self.state.prediction.is_empty();
                    ui.add_enabled_ui(has_article, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in [ExportFormat::Markdown, ExportFormat::Html] {
                                if ui.button(format!("{}\u{2026}", format.label())).clicked() {
                                    actions.push(UiAction::Export(format));
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut dark = self.dark_mode();
                    if ui.checkbox(&mut dark, "Dark mode").changed() {
                        self.session.dark_mode = Some(dark);
                        self.save_session();
                        ui.close_menu();
                    }
                });
                if ui.button("About").clicked() {
                    self.state.show_about = true;
                }
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.predict_manager.endpoint())
                            .small()
                            .weak(),
                    );
                });
            });
        });

        let texture = self
            .preview_texture
            .sync(ctx, self.state.preview.as_ref())
            .cloned();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(ui::theme::CONTENT_MAX_WIDTH);
                        ui::panels::header::render(ui);

                        if self.state.preview.is_none() {
                            ui::panels::upload::render(ui, &mut actions);
                        } else {
                            ui.columns(2, |cols| {
                                ui::panels::preview::render(
                                    &mut cols[0],
                                    &self.state,
                                    texture.as_ref(),
                                    &mut actions,
                                );
                                ui::panels::result::render(&mut cols[1], &self.state, &mut actions);
                            });
                        }
                    });
                });
        });

        ui::panels::about::render(ctx, &mut self.state, self.predict_manager.endpoint());

        for action in actions {
            self.handle_action(ctx, action);
        }
    }
}
