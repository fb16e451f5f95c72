// PlantCare - app/predict.rs
//
// Prediction request lifecycle. Runs the blocking HTTP round trip on a
// background thread and sends the outcome to the UI thread via an mpsc
// channel.
//
// Architecture:
//   - `PredictManager` lives on the UI thread; `run_request` runs on a
//     background thread, one per submission.
//   - There is no cancellation. A superseded request still runs to the end;
//     AppState drops its result by request id.

use crate::app::state::PredictRequest;
use crate::core::model::PredictProgress;
use crate::core::predict::PredictClient;
use crate::util::error::PredictError;
use std::io;
use std::sync::mpsc;

/// Dispatches prediction requests and collects their outcomes.
pub struct PredictManager {
    client: PredictClient,

    /// Sender cloned into every request thread.
    progress_tx: mpsc::Sender<PredictProgress>,

    /// Channel receiver for the UI to poll outcomes.
    progress_rx: mpsc::Receiver<PredictProgress>,
}

impl PredictManager {
    /// Create a manager talking to the service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, PredictError> {
        let client = PredictClient::new(base_url)?;
        let (progress_tx, progress_rx) = mpsc::channel();
        tracing::debug!(endpoint = client.endpoint(), "Predict manager ready");
        Ok(Self {
            client,
            progress_tx,
            progress_rx,
        })
    }

    /// Endpoint URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Spawn a background thread for `request`. Returns immediately.
    ///
    /// Every submission yields exactly one outcome on the channel, including
    /// when the thread cannot be started.
    pub fn submit(&self, request: PredictRequest) {
        let client = self.client.clone();
        let tx = self.progress_tx.clone();
        let request_id = request.id;

        let spawned = std::thread::Builder::new()
            .name(format!("predict-{request_id}"))
            .spawn(move || run_request(client, request, tx));

        if let Err(e) = spawned {
            report_spawn_failure(&self.progress_tx, request_id, &e);
        }
    }

    /// Poll for outcomes without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<PredictProgress> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.progress_rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

fn report_spawn_failure(tx: &mpsc::Sender<PredictProgress>, request_id: u64, err: &io::Error) {
    tracing::error!(request_id, error = %err, "Failed to spawn predict thread");
    let _ = tx.send(PredictProgress::Failed {
        request_id,
        error: format!("Cannot start request: {err}"),
    });
}

/// Perform one round trip and report the outcome.
fn run_request(client: PredictClient, request: PredictRequest, tx: mpsc::Sender<PredictProgress>) {
    let request_id = request.id;
    let msg = match client.predict(&request.image) {
        Ok(article) => PredictProgress::Completed {
            request_id,
            article,
        },
        Err(e) => {
            tracing::warn!(request_id, error = %e, "Prediction failed");
            PredictProgress::Failed {
                request_id,
                error: e.user_message(),
            }
        }
    };

    // Receiver dropped means the window closed; nothing left to tell.
    let _ = tx.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use crate::core::model::{DisplayMode, SelectedImage};
    use std::path::PathBuf;

    #[test]
    fn test_spawn_failure_settles_loading_state() {
        let manager = PredictManager::new("http://127.0.0.1:9").unwrap();
        let mut state = AppState::new(false);
        state.select_file(SelectedImage::from_bytes(
            PathBuf::from("cactus.jpg"),
            b"jpeg".to_vec(),
        ));
        let request = state.begin_submit().unwrap();
        assert_eq!(state.display_mode(), DisplayMode::Loading);

        let err = io::Error::new(io::ErrorKind::WouldBlock, "thread limit reached");
        report_spawn_failure(&manager.progress_tx, request.id, &err);

        let mut outcomes = manager.poll_progress();
        assert_eq!(outcomes.len(), 1);
        let PredictProgress::Failed { request_id, error } = outcomes.remove(0) else {
            panic!("expected a failure outcome");
        };
        assert!(error.contains("thread limit reached"));

        assert!(state.finish_submit(request_id, Err(error)));
        assert!(!state.loading);
        assert_eq!(state.display_mode(), DisplayMode::Error);
    }
}
