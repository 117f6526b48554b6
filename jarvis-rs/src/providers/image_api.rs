//! Image generation endpoint client
//!
//! Talks to a self-hosted HTTP service: POST a prompt, get back either a
//! public URL or a path on the local disk.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ImageOutput, ImageProvider};
use crate::error::{BotError, Result};

/// Image rendering can be slow on CPU hosts.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(180);

pub struct ImageApiClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ImageApiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    image_url: Option<String>,
    path: Option<String>,
}

#[async_trait::async_trait]
impl ImageProvider for ImageApiClient {
    async fn generate(&self, prompt: &str) -> Result<ImageOutput> {
        debug!("image endpoint: generating");

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(GENERATION_TIMEOUT)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("image endpoint returned {status}");
            return Err(BotError::Provider(format!(
                "image endpoint returned {status}"
            )));
        }

        let body: GenerateResponse = response.json().await?;

        if let Some(url) = body.image_url {
            Ok(ImageOutput::Url(url))
        } else if let Some(path) = body.path {
            Ok(ImageOutput::File(PathBuf::from(path)))
        } else {
            Err(BotError::Provider(
                "image endpoint returned no result".to_string(),
            ))
        }
    }
}
