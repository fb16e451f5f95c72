// PlantCare - app/headless.rs
//
// One-shot mode for `--no-gui`: load the image, submit it on the calling
// thread, and hand the article back for printing.

use crate::core::model::SelectedImage;
use crate::core::predict::PredictClient;
use crate::util::error::Result;
use std::path::Path;

/// Submit the image at `image_path` to the service at `server_url` and
/// return the article text.
pub fn run(image_path: &Path, server_url: &str) -> Result<String> {
    let image = SelectedImage::load(image_path)?;
    let client = PredictClient::new(server_url)?;

    tracing::info!(
        file = %image.file_name,
        endpoint = client.endpoint(),
        "Headless prediction"
    );

    Ok(client.predict(&image)?)
}
