//! AI provider seams
//!
//! Three independent capabilities, each behind its own trait so handlers
//! and tests never depend on a concrete backend: short text completion,
//! image generation and video generation.

use std::path::PathBuf;

use crate::error::Result;

pub mod bytez;
pub mod image_api;
pub mod mock;

pub use bytez::BytezClient;
pub use image_api::ImageApiClient;

/// Maximum characters of a completion relayed back to the chat.
pub const MAX_ANSWER_CHARS: usize = 3500;

/// Where a generated image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutput {
    Url(String),
    File(PathBuf),
}

#[async_trait::async_trait]
pub trait TextProvider: Send + Sync {
    /// Short text completion for a user prompt, already clamped to
    /// [`MAX_ANSWER_CHARS`].
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ImageOutput>;
}

#[async_trait::async_trait]
pub trait VideoProvider: Send + Sync {
    /// Returns a result descriptor (typically a URL) for the finished video.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Clamp a completion to the relay-safe length, on a char boundary.
pub(crate) fn clamp_answer(text: &str) -> String {
    if text.chars().count() <= MAX_ANSWER_CHARS {
        text.to_string()
    } else {
        text.chars().take(MAX_ANSWER_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_answer_short_text_untouched() {
        assert_eq!(clamp_answer("hello"), "hello");
    }

    #[test]
    fn test_clamp_answer_truncates_long_text() {
        let long = "x".repeat(MAX_ANSWER_CHARS + 100);
        let clamped = clamp_answer(&long);
        assert_eq!(clamped.chars().count(), MAX_ANSWER_CHARS);
    }

    #[test]
    fn test_clamp_answer_is_char_safe() {
        let long = "é".repeat(MAX_ANSWER_CHARS + 1);
        let clamped = clamp_answer(&long);
        assert_eq!(clamped.chars().count(), MAX_ANSWER_CHARS);
    }
}
