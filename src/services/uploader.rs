use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::MediaConfig;

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("image host rejected upload ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("image host response did not include a secure URL")]
    MalformedResponse,
}

/// Boundary component that moves image bytes to external storage and returns
/// a public URL. One attempt per call; failures propagate to the caller.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<String, UploadError>;
}

/// Cloudinary upload API client using signed multipart requests.
pub struct CloudinaryUploader {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    client: Client,
}

impl CloudinaryUploader {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            client: Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", CLOUDINARY_API_BASE, self.cloud_name)
    }

    // Signed parameters are serialized in alphabetical order with the secret
    // appended, per the Cloudinary authentication scheme.
    fn signature(&self, folder: &str, timestamp: u64) -> String {
        let to_sign = format!("folder={}&timestamp={}{}", folder, timestamp, self.api_secret);
        hex::encode(Sha256::digest(to_sign.as_bytes()))
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<String, UploadError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let signature = self.signature(folder, timestamp);

        debug!(filename, folder, size = bytes.len(), "uploading image");

        let file = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { status, detail });
        }

        let body: UploadResponse = response.json().await?;
        let url = body.secure_url.ok_or(UploadError::MalformedResponse)?;

        info!(url = %url, "image uploaded");
        Ok(url)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn uploader() -> CloudinaryUploader {
        CloudinaryUploader::new(&MediaConfig {
            cloud_name: "demo".to_string(),
            api_key: "key123".to_string(),
            api_secret: "secret456".to_string(),
            folder: "CB Connect".to_string(),
        })
    }

    #[test]
    fn upload_url_targets_the_configured_cloud() {
        assert_eq!(
            uploader().upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn signature_is_deterministic_for_same_inputs() {
        let uploader = uploader();
        let a = uploader.signature("CB Connect", 1_700_000_000);
        let b = uploader.signature("CB Connect", 1_700_000_000);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_varies_with_folder_and_timestamp() {
        let uploader = uploader();
        let base = uploader.signature("CB Connect", 1_700_000_000);
        assert_ne!(base, uploader.signature("other", 1_700_000_000));
        assert_ne!(base, uploader.signature("CB Connect", 1_700_000_001));
    }
}
