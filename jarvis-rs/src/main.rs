use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use teloxide::Bot;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use jarvis_rs::broadcast::Broadcaster;
use jarvis_rs::config::Config;
use jarvis_rs::moderation::ModerationManager;
use jarvis_rs::providers::{BytezClient, ImageApiClient, ImageProvider, TextProvider, VideoProvider};
use jarvis_rs::quota::QuotaManager;
use jarvis_rs::store::Store;
use jarvis_rs::telegram::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting jarvis-rs");

    // Load configuration
    let config = if Path::new("config.toml").exists() {
        Config::from_file("config.toml")?
    } else {
        info!("No config file found, using defaults");
        Config::default()
    };

    info!("Configuration loaded");
    info!("  Database: {}", config.storage.database_path);
    info!("  Admins: {:?}", config.telegram.admin_ids);
    info!("  Chat model: {}", config.providers.chat_model);
    info!("  Video model: {}", config.providers.video_model);

    let pool = open_database(&config.storage.database_path).await?;
    let store = Arc::new(Store::new(pool));
    store.init_db().await?;

    let bytez = Arc::new(BytezClient::new(
        config.providers.bytez_api_key.clone(),
        config.providers.chat_model.clone(),
        config.providers.video_model.clone(),
    ));
    let image = Arc::new(ImageApiClient::new(config.providers.image_endpoint.clone()));

    let state = Arc::new(AppState {
        store: Arc::clone(&store),
        quota: QuotaManager::new(Arc::clone(&store)),
        moderation: ModerationManager::new(Arc::clone(&store)),
        broadcaster: Broadcaster::new(Arc::clone(&store)),
        text: Arc::clone(&bytez) as Arc<dyn TextProvider>,
        video: bytez as Arc<dyn VideoProvider>,
        image: image as Arc<dyn ImageProvider>,
        admin_ids: config.telegram.admin_ids.clone(),
    });

    let bot = if config.telegram.token.is_empty() {
        Bot::from_env()
    } else {
        Bot::new(config.telegram.token.clone())
    };

    info!("Jarvis running...");
    telegram::run(bot, state).await;

    Ok(())
}

/// Open the configured database file, falling back to in-memory storage
/// when the file cannot be opened. In fallback mode all quota and block
/// state resets on restart.
async fn open_database(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    match SqlitePool::connect_with(options).await {
        Ok(pool) => Ok(pool),
        Err(e) => {
            warn!("Cannot open {path}: {e}; falling back to in-memory storage");
            SqlitePool::connect("sqlite::memory:").await
        }
    }
}
