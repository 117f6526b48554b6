//! Scripted providers for tests

use super::{clamp_answer, ImageOutput, ImageProvider, TextProvider, VideoProvider};
use crate::error::{BotError, Result};

pub struct MockTextProvider {
    reply: String,
    fail: bool,
}

impl MockTextProvider {
    pub fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), fail: false }
    }

    pub fn failing() -> Self {
        Self { reply: String::new(), fail: true }
    }
}

#[async_trait::async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        if self.fail {
            Err(BotError::Provider("mock completion failure".to_string()))
        } else {
            Ok(clamp_answer(&self.reply))
        }
    }
}

pub struct MockImageProvider {
    output: Option<ImageOutput>,
}

impl MockImageProvider {
    pub fn with_url(url: &str) -> Self {
        Self { output: Some(ImageOutput::Url(url.to_string())) }
    }

    pub fn with_file(path: &str) -> Self {
        Self { output: Some(ImageOutput::File(path.into())) }
    }

    pub fn failing() -> Self {
        Self { output: None }
    }
}

#[async_trait::async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(&self, _prompt: &str) -> Result<ImageOutput> {
        self.output
            .clone()
            .ok_or_else(|| BotError::Provider("mock image failure".to_string()))
    }
}

pub struct MockVideoProvider {
    descriptor: Option<String>,
}

impl MockVideoProvider {
    pub fn new(descriptor: &str) -> Self {
        Self { descriptor: Some(descriptor.to_string()) }
    }

    pub fn failing() -> Self {
        Self { descriptor: None }
    }
}

#[async_trait::async_trait]
impl VideoProvider for MockVideoProvider {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.descriptor
            .clone()
            .ok_or_else(|| BotError::Provider("mock video failure".to_string()))
    }
}
