use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub storage: StorageConfig,
    pub providers: ProviderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot API token. When empty, TELOXIDE_TOKEN is read from the environment.
    pub token: String,
    /// Numeric ids allowed to run admin commands.
    pub admin_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub database_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub bytez_api_key: String,
    pub chat_model: String,
    pub video_model: String,
    /// HTTP endpoint of the image generation service.
    pub image_endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::BotError::Config(e.to_string()))?;

        toml::from_str(&content).map_err(|e| crate::error::BotError::Config(e.to_string()))
    }

    pub fn is_admin(&self, chat_id: i64) -> bool {
        self.telegram.admin_ids.contains(&chat_id)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig {
                token: String::new(),
                admin_ids: Vec::new(),
            },
            storage: StorageConfig {
                database_path: "/tmp/jarvis.db".to_string(),
            },
            providers: ProviderConfig {
                bytez_api_key: String::new(),
                chat_model: "openai/gpt-4.1".to_string(),
                video_model: "openai/sora-2".to_string(),
                image_endpoint: "http://127.0.0.1:5000/generate".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.database_path, "/tmp/jarvis.db");
        assert_eq!(config.providers.chat_model, "openai/gpt-4.1");
        assert_eq!(config.providers.video_model, "openai/sora-2");
        assert!(config.telegram.admin_ids.is_empty());
    }

    #[test]
    fn test_is_admin() {
        let mut config = Config::default();
        config.telegram.admin_ids = vec![42, 99];

        assert!(config.is_admin(42));
        assert!(config.is_admin(99));
        assert!(!config.is_admin(7));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [telegram]
            token = "123:abc"
            admin_ids = [370884641]

            [storage]
            database_path = "/var/lib/jarvis/jarvis.db"

            [providers]
            bytez_api_key = "key"
            chat_model = "openai/gpt-4.1"
            video_model = "openai/sora-2"
            image_endpoint = "http://localhost:5000/generate"

            [logging]
            level = "debug"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.telegram.admin_ids, vec![370884641]);
        assert_eq!(config.storage.database_path, "/var/lib/jarvis/jarvis.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/config.toml");
        assert!(result.is_err());
    }
}
