use anyhow::Context;
use audio::AudioStore;
use reply::Responder;
use secrets::Secrets;
use static_toml::static_toml;
use std::{path::Path, sync::Arc};
use tokio::net::TcpListener;
use twilio::Client as TwilioClient;

static_toml! { static CONFIG = include_toml!("Config.toml"); }

mod audio;
mod corpus;
mod reply;
mod secrets;
mod webhook;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment and logger
    let dotenv = dotenv::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        log::warn!("No .env file loaded ({e}), using the process environment");
    }

    // Load the secrets
    let secrets = Secrets::from_env().context("Failed to load the Twilio credentials")?;

    // Ensure the corpus and audio directories exist
    let corpus_path = Path::new(CONFIG.settings.corpus_path);
    if let Some(corpus_dir) = corpus_path.parent() {
        tokio::fs::create_dir_all(corpus_dir)
            .await
            .with_context(|| format!("Failed to create {}", corpus_dir.display()))?;
    }
    tokio::fs::create_dir_all(CONFIG.settings.audio_dir)
        .await
        .with_context(|| format!("Failed to create {}", CONFIG.settings.audio_dir))?;

    // Initialize the twilio client
    log::info!("Initializing the Twilio client");
    let twilio = TwilioClient::new(&secrets.twilio_account_sid, &secrets.twilio_auth_token);

    log::info!("Reading phrases from {}", corpus_path.display());
    let responder = Arc::new(Responder::new(corpus_path));
    let audio = AudioStore::new(CONFIG.settings.audio_dir);

    // Initialize the TCP listener
    log::info!(
        "Connecting to the server at {}",
        CONFIG.settings.local_address
    );
    let tcp = TcpListener::bind(CONFIG.settings.local_address)
        .await
        .with_context(|| format!("Failed to bind {}", CONFIG.settings.local_address))?;

    let router = webhook::router(twilio, responder, audio);

    // Start the webserver
    log::info!("Starting the webserver");
    axum::serve(tcp, router.into_make_service())
        .await
        .context("Failed to start the server")?;

    Ok(())
}
