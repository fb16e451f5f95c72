// PlantCare - core/predict.rs
//
// Client side of the prediction service contract:
//   POST {base}/api/predict, multipart field `image`
//   200 -> JSON object with an `article` or `text` string
//   non-2xx -> "Server error: <status text>"
//
// Blocking: callers run it on a background thread (app/predict.rs)
// or directly in headless mode. No timeout and no retry.

use crate::core::model::SelectedImage;
use crate::util::constants::{IMAGE_FIELD_NAME, NO_CONTENT_MESSAGE, PREDICT_ENDPOINT_PATH};
use crate::util::error::PredictError;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};

/// HTTP client bound to one prediction endpoint.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl PredictClient {
    /// Build a client for the service at `base_url` (scheme + host + optional prefix).
    pub fn new(base_url: &str) -> Result<Self, PredictError> {
        let http = reqwest::blocking::Client::builder()
            // reqwest's blocking client defaults to 30 s; article generation
            // routinely takes longer and the contract has no timeout.
            .timeout(None::<Duration>)
            .user_agent(format!(
                "{}/{}",
                crate::util::constants::APP_ID,
                crate::util::constants::APP_VERSION
            ))
            .build()
            .map_err(|e| PredictError::Client { source: e })?;

        Ok(Self {
            http,
            endpoint: endpoint_url(base_url),
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload `image` and return the article text to display.
    pub fn predict(&self, image: &SelectedImage) -> Result<String, PredictError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| PredictError::Client { source: e })?;
        let form = Form::new().part(IMAGE_FIELD_NAME, part);

        tracing::info!(
            endpoint = %self.endpoint,
            file = %image.file_name,
            bytes = image.len(),
            "Submitting image for prediction"
        );
        let started = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| PredictError::Transport { source: e })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Prediction service returned an error");
            return Err(PredictError::Http {
                status: status.as_u16(),
                status_text: status_text(status),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| PredictError::Transport { source: e })?;
        let article = article_from_body(&body)?;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = article.len(),
            "Prediction received"
        );
        Ok(article)
    }
}

/// Join the base URL and the endpoint path without doubling slashes.
pub fn endpoint_url(base_url: &str) -> String {
    format!("{}{PREDICT_ENDPOINT_PATH}", base_url.trim_end_matches('/'))
}

/// Reason phrase for a status, or its number when the code has none.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

/// Extract the display text from a successful response body.
///
/// A non-empty `article` string wins, then a non-empty `text` string, then a
/// fixed "no content" message. Non-object JSON other than `null` has neither
/// field and also yields the message; `null` and invalid JSON are errors.
pub fn article_from_body(body: &[u8]) -> Result<String, PredictError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| PredictError::InvalidBody {
        reason: e.to_string(),
    })?;

    if value.is_null() {
        return Err(PredictError::InvalidBody {
            reason: "response body is null".to_string(),
        });
    }

    let pick = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Ok(pick("article")
        .or_else(|| pick("text"))
        .unwrap_or_else(|| NO_CONTENT_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_field_preferred() {
        let body = br##"{"article": "# Basil", "text": "ignored"}"##;
        assert_eq!(article_from_body(body).unwrap(), "# Basil");
    }

    #[test]
    fn test_text_used_when_article_missing_or_empty() {
        assert_eq!(article_from_body(br#"{"text": "hello"}"#).unwrap(), "hello");
        assert_eq!(
            article_from_body(br#"{"article": "", "text": "hello"}"#).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_no_content_fallback() {
        assert_eq!(article_from_body(b"{}").unwrap(), NO_CONTENT_MESSAGE);
        assert_eq!(
            article_from_body(br#"{"article": 42}"#).unwrap(),
            NO_CONTENT_MESSAGE
        );
        assert_eq!(article_from_body(b"[1, 2]").unwrap(), NO_CONTENT_MESSAGE);
    }

    #[test]
    fn test_invalid_bodies_are_errors() {
        assert!(matches!(
            article_from_body(b"<html>oops</html>"),
            Err(PredictError::InvalidBody { .. })
        ));
        assert!(matches!(
            article_from_body(b"null"),
            Err(PredictError::InvalidBody { .. })
        ));
    }

    #[test]
    fn test_endpoint_url_joining() {
        assert_eq!(
            endpoint_url("http://localhost:8000"),
            "http://localhost:8000/api/predict"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/"),
            "http://localhost:8000/api/predict"
        );
        assert_eq!(
            endpoint_url("https://plants.example/app"),
            "https://plants.example/app/api/predict"
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(StatusCode::BAD_GATEWAY), "Bad Gateway");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }
}
