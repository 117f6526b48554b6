//! Bytez model API client
//!
//! One HTTP client covers both hosted models: the chat model answers
//! `/chat` prompts, the video model renders `/video` prompts.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{clamp_answer, TextProvider, VideoProvider};
use crate::error::{BotError, Result};

const DEFAULT_BASE_URL: &str = "https://api.bytez.com/models/v2";

/// System instruction sent with every chat completion.
const TERSE_INSTRUCTION: &str = "Reply very short. Only key points. No extra talk.";

pub struct BytezClient {
    api_key: String,
    chat_model: String,
    video_model: String,
    base_url: String,
    client: reqwest::Client,
}

impl BytezClient {
    pub fn new(api_key: String, chat_model: String, video_model: String) -> Self {
        Self {
            api_key,
            chat_model,
            video_model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn run(&self, model: &str, body: serde_json::Value) -> Result<String> {
        debug!("Bytez: running model {model}");

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, model))
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Bytez: request failed with status {status}: {error_text}");
            return Err(BotError::Provider(format!(
                "Bytez request failed: {status} - {error_text}"
            )));
        }

        let run: BytezRunResponse = response.json().await?;

        if let Some(error) = run.error {
            return Err(BotError::Provider(error));
        }

        match run.output {
            Some(output) => Ok(output_to_text(output)),
            None => Err(BotError::Provider("empty model output".to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct BytezRunResponse {
    error: Option<String>,
    output: Option<serde_json::Value>,
}

/// Flatten whatever shape the model returned into plain text.
fn output_to_text(output: serde_json::Value) -> String {
    match output {
        serde_json::Value::String(s) => s,
        serde_json::Value::Object(ref map) => match map.get("content") {
            Some(serde_json::Value::String(content)) => content.clone(),
            _ => output.to_string(),
        },
        other => other.to_string(),
    }
}

#[async_trait::async_trait]
impl TextProvider for BytezClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            ChatMessage { role: "system", content: TERSE_INSTRUCTION },
            ChatMessage { role: "user", content: prompt },
        ];

        let output = self
            .run(&self.chat_model, serde_json::json!({ "messages": messages }))
            .await?;

        Ok(clamp_answer(&output))
    }
}

#[async_trait::async_trait]
impl VideoProvider for BytezClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.run(&self.video_model, serde_json::json!({ "input": prompt }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_to_text_plain_string() {
        assert_eq!(output_to_text(serde_json::json!("hi")), "hi");
    }

    #[test]
    fn test_output_to_text_message_object() {
        let output = serde_json::json!({ "role": "assistant", "content": "two words" });
        assert_eq!(output_to_text(output), "two words");
    }

    #[test]
    fn test_output_to_text_other_shape_is_stringified() {
        let output = serde_json::json!({ "url": "https://cdn.example/video.mp4" });
        assert_eq!(
            output_to_text(output),
            r#"{"url":"https://cdn.example/video.mp4"}"#
        );
    }

    #[test]
    fn test_run_response_with_error() {
        let run: BytezRunResponse =
            serde_json::from_str(r#"{"error": "rate limited", "output": null}"#).unwrap();
        assert_eq!(run.error.as_deref(), Some("rate limited"));
        assert!(run.output.is_none());
    }
}
