use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Today's APOD metadata as returned by the NASA API.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDescriptor {
    pub media_type: String,
    pub url: String,
    #[serde(rename = "hdurl")]
    pub hd_url: Option<String>,
    pub title: String,
}

impl MediaDescriptor {
    /// Effective download URL: the HD variant when the API provides one.
    pub fn download_url(&self) -> &str {
        self.hd_url.as_deref().unwrap_or(&self.url)
    }

    /// Only static images can be used as wallpaper; videos and embeds are
    /// rejected before anything is downloaded.
    pub fn ensure_image(&self) -> Result<()> {
        if self.media_type != "image" {
            return Err(Error::UnsupportedMediaType(self.media_type.clone()));
        }
        Ok(())
    }
}

/// Lowercased image extension taken from the URL path, `jpg` when absent.
pub fn image_extension(url: &str) -> String {
    Path::new(url)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpg")
        .to_lowercase()
}

pub struct ApodClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ApodClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: APOD_ENDPOINT.to_string(),
            api_key: std::env::var("NASA_API_KEY").ok(),
        }
    }

    /// Fetches and validates today's descriptor.
    pub async fn fetch(&self) -> Result<MediaDescriptor> {
        let api_key = self.api_key.as_deref().unwrap_or("DEMO_KEY");
        let url = format!("{}?api_key={}", self.endpoint, api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "Failed to fetch APOD data: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        if body.is_empty() {
            return Err(Error::Network("Empty response from APOD API".to_string()));
        }

        let descriptor: MediaDescriptor = serde_json::from_str(&body)?;
        descriptor.ensure_image()?;

        Ok(descriptor)
    }

    /// Downloads `url` to `dest`. The body is staged at a `.part` path and
    /// renamed into place, so a failed transfer never leaves a truncated
    /// image at `dest`.
    pub async fn download_image(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download image: HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Download(e.to_string()))?;

        let staging = dest.with_extension("part");
        fs::write(&staging, &bytes).map_err(|e| Error::Download(e.to_string()))?;
        fs::rename(&staging, dest).map_err(|e| Error::Download(e.to_string()))?;

        Ok(())
    }
}

impl Default for ApodClient {
    fn default() -> Self {
        Self::new()
    }
}
