// PlantCare - app/state.rs
//
// View-controller state. Holds the selected image, its preview, the current
// article, the loading flag and the error message, and derives which of the
// display modes the UI shows. Owned by the eframe::App implementation.
//
// Every request carries an id. Reset and new selections bump the current id,
// so a request that finishes after the user moved on is ignored.

use crate::core::markdown::Document;
use crate::core::model::{DisplayMode, SelectedImage};
use crate::core::preview::Preview;

/// A submission handed to the network layer.
#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub id: u64,
    pub image: SelectedImage,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Image chosen by the user.
    pub selected_file: Option<SelectedImage>,

    /// Local preview of `selected_file`.
    pub preview: Option<Preview>,

    /// Markdown article returned by the service; empty when none.
    pub prediction: String,

    /// Parsed form of `prediction`, rebuilt whenever it changes.
    pub document: Document,

    /// Whether a request is in flight.
    pub loading: bool,

    /// Message of the last failure, if any.
    pub error: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,

    /// Id of the request whose result is still wanted.
    current_request: Option<u64>,

    /// Monotonic counter for preview URIs and request ids.
    seq: u64,
}

impl AppState {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            selected_file: None,
            preview: None,
            prediction: String::new(),
            document: Document::default(),
            loading: false,
            error: None,
            status_message: "Ready. Select a plant photo to begin.".to_string(),
            show_about: false,
            debug_mode,
            current_request: None,
            seq: 0,
        }
    }

    /// Summarise configuration warnings in the status bar.
    ///
    /// Every warning is kept; the full text also goes to the log.
    pub fn note_startup_warnings(&mut self, warnings: &[String]) {
        self.status_message = match warnings {
            [] => return,
            [only] => only.clone(),
            many => format!("{} config warnings: {}", many.len(), many.join(" | ")),
        };
    }

    /// Take `image` as the current selection.
    ///
    /// Always produces a preview and clears any previous article or error.
    /// A request still in flight for an earlier image is abandoned.
    pub fn select_file(&mut self, image: SelectedImage) {
        self.seq += 1;
        let preview = Preview::create(self.seq, &image);

        tracing::info!(
            file = %image.file_name,
            bytes = image.len(),
            decoded = preview.image.is_some(),
            "Image selected"
        );

        self.status_message = format!("Selected {}.", image.file_name);
        self.error = None;
        self.set_prediction(String::new());
        self.selected_file = Some(image);
        self.preview = Some(preview);
        self.abandon_request();
    }

    /// Start a submission.
    ///
    /// Returns `None` (and changes nothing) when no image is selected or a
    /// request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PredictRequest> {
        if self.loading {
            tracing::debug!("Submit ignored: request already in flight");
            return None;
        }
        let image = self.selected_file.clone()?;

        self.seq += 1;
        let id = self.seq;
        self.current_request = Some(id);
        self.loading = true;
        self.error = None;
        self.status_message = format!("Analyzing {}...", image.file_name);

        Some(PredictRequest { id, image })
    }

    /// Apply the outcome of request `request_id`.
    ///
    /// `Ok` carries the article text, `Err` the user-facing message.
    /// Returns false when the request is no longer current and was ignored.
    pub fn finish_submit(&mut self, request_id: u64, outcome: Result<String, String>) -> bool {
        if self.current_request != Some(request_id) {
            tracing::debug!(request_id, "Discarding result of abandoned request");
            return false;
        }
        self.current_request = None;
        self.loading = false;

        match outcome {
            Ok(article) => {
                self.status_message = format!(
                    "Article received at {}.",
                    chrono::Local::now().format("%H:%M:%S")
                );
                self.set_prediction(article);
            }
            Err(message) => {
                self.status_message = "Analysis failed.".to_string();
                self.error = Some(message);
            }
        }
        true
    }

    /// Return every field to its initial empty value.
    pub fn reset(&mut self) {
        self.selected_file = None;
        self.preview = None;
        self.set_prediction(String::new());
        self.error = None;
        self.abandon_request();
        self.status_message = "Ready.".to_string();
        tracing::debug!("State reset");
    }

    /// Which view the result area should show.
    pub fn display_mode(&self) -> DisplayMode {
        if self.preview.is_none() {
            DisplayMode::Upload
        } else if self.loading {
            DisplayMode::Loading
        } else if self.error.is_some() {
            DisplayMode::Error
        } else if self.prediction.is_empty() {
            DisplayMode::Placeholder
        } else {
            DisplayMode::Article
        }
    }

    /// Whether the "Generate Article" action is offered.
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.loading && self.prediction.is_empty()
    }

    fn set_prediction(&mut self, prediction: String) {
        self.document = Document::parse(&prediction);
        self.prediction = prediction;
    }

    fn abandon_request(&mut self) {
        if let Some(id) = self.current_request.take() {
            tracing::info!(request_id = id, "In-flight request abandoned");
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn image(name: &str) -> SelectedImage {
        SelectedImage::from_bytes(PathBuf::from(name), b"jpeg-bytes".to_vec())
    }

    fn assert_initial(state: &AppState) {
        assert!(state.selected_file.is_none());
        assert!(state.preview.is_none());
        assert!(state.prediction.is_empty());
        assert!(state.document.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.display_mode(), DisplayMode::Upload);
    }

    #[test]
    fn test_initial_state() {
        assert_initial(&AppState::new(false));
    }

    #[test]
    fn test_select_produces_preview_and_clears_previous_results() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let req = state.begin_submit().unwrap();
        state.finish_submit(req.id, Err("Server error: Bad Gateway".to_string()));
        assert_eq!(state.display_mode(), DisplayMode::Error);

        state.select_file(image("b.jpg"));
        assert!(state.preview.as_ref().is_some_and(|p| !p.uri.is_empty()));
        assert!(state.error.is_none());
        assert!(state.prediction.is_empty());
        assert_eq!(state.display_mode(), DisplayMode::Placeholder);
        assert!(state.can_submit());
    }

    #[test]
    fn test_preview_uris_are_unique_per_selection() {
        let mut state = AppState::new(false);
        state.select_file(image("same.jpg"));
        let first = state.preview.clone().unwrap().uri;
        state.select_file(image("same.jpg"));
        assert_ne!(first, state.preview.unwrap().uri);
    }

    #[test]
    fn test_submit_without_file_is_noop() {
        let mut state = AppState::new(false);
        assert!(state.begin_submit().is_none());
        assert_initial(&state);
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let first = state.begin_submit().unwrap();
        assert!(state.loading);
        assert_eq!(state.display_mode(), DisplayMode::Loading);
        assert!(!state.can_submit());
        assert!(state.begin_submit().is_none());
        assert!(state.finish_submit(first.id, Ok("done".to_string())));
    }

    #[test]
    fn test_success_renders_article_markdown() {
        let mut state = AppState::new(false);
        state.select_file(image("basil.jpg"));
        let req = state.begin_submit().unwrap();
        assert_eq!(req.image.file_name, "basil.jpg");

        let article = "# Basil\n\nKeep the soil **moist**.";
        assert!(state.finish_submit(req.id, Ok(article.to_string())));

        assert_eq!(state.display_mode(), DisplayMode::Article);
        assert_eq!(state.prediction, article);
        assert_eq!(state.document, Document::parse(article));
        assert!(!state.loading);
        assert!(!state.can_submit());
    }

    #[test]
    fn test_failure_shows_message() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let req = state.begin_submit().unwrap();
        state.finish_submit(req.id, Err("Server error: Internal Server Error".to_string()));

        assert_eq!(state.display_mode(), DisplayMode::Error);
        assert!(state
            .error
            .as_deref()
            .is_some_and(|e| e.contains("Internal Server Error")));
        assert!(!state.loading);

        // A retry clears the error while loading.
        let retry = state.begin_submit().unwrap();
        assert!(state.error.is_none());
        assert_ne!(retry.id, req.id);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let req = state.begin_submit().unwrap();
        state.finish_submit(req.id, Ok("# Done".to_string()));

        state.reset();
        assert_initial(&state);

        // Reset while loading also clears the flag.
        state.select_file(image("a.jpg"));
        state.begin_submit().unwrap();
        state.reset();
        assert_initial(&state);
    }

    #[test]
    fn test_stale_result_after_reset_is_ignored() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let req = state.begin_submit().unwrap();
        state.reset();

        assert!(!state.finish_submit(req.id, Ok("# Late".to_string())));
        assert_initial(&state);
    }

    #[test]
    fn test_stale_result_after_new_selection_is_ignored() {
        let mut state = AppState::new(false);
        state.select_file(image("a.jpg"));
        let req = state.begin_submit().unwrap();
        state.select_file(image("b.jpg"));

        assert!(!state.finish_submit(req.id, Err("boom".to_string())));
        assert_eq!(state.display_mode(), DisplayMode::Placeholder);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_startup_warnings_are_all_reported() {
        let mut state = AppState::new(false);
        let initial = state.status_message.clone();
        state.note_startup_warnings(&[]);
        assert_eq!(state.status_message, initial);

        state.note_startup_warnings(&["bad theme".to_string()]);
        assert_eq!(state.status_message, "bad theme");

        state.note_startup_warnings(&["bad theme".to_string(), "bad level".to_string()]);
        assert!(state.status_message.starts_with("2 config warnings"));
        assert!(state.status_message.contains("bad theme"));
        assert!(state.status_message.contains("bad level"));
    }
}
