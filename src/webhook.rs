use crate::{audio::AudioStore, reply::Responder, CONFIG};
use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use twilio::{
    twiml::{self, Twiml},
    Client as TwilioClient, Message,
};

pub fn router(twilio: TwilioClient, responder: Arc<Responder>, audio: AudioStore) -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health_check", get(health_check))
        .route("/webhook", post(webhook_handler))
        .layer(Extension(twilio))
        .layer(Extension(responder))
        .layer(Extension(audio))
}

async fn alive() -> &'static str {
    CONFIG.texts.alive
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn webhook_handler(
    twilio: Extension<TwilioClient>,
    responder: Extension<Arc<Responder>>,
    audio: Extension<AudioStore>,
    request: Request,
) -> impl IntoResponse {
    twilio
        .clone()
        .respond_to_webhook_async(request, |message: Message| async move {
            log::info!(
                "Received message from {} with id {}",
                message.from,
                message.sid
            );

            let reply = match message.has_media() {
                true => handle_media(&twilio, &audio, &message).await,
                false => {
                    let text = message.body.as_deref().unwrap_or_default();
                    log::debug!("Text message {}: {:?}", message.sid, text);
                    responder.select_reply(text).await
                }
            };

            let mut response = Twiml::new();
            response.add(&twiml::Message::new(reply));
            response
        })
        .await
}

/// Only the first attachment is looked at, whatever `NumMedia` says.
async fn handle_media(twilio: &TwilioClient, audio: &AudioStore, message: &Message) -> String {
    let Some(media) = message.first_media() else {
        log::warn!(
            "Message {} reports {:?} media but carries no media fields",
            message.sid,
            message.num_media
        );
        return CONFIG.texts.audio_only.to_owned();
    };

    log::debug!(
        "Media for message {}: url={} type={}",
        message.sid,
        media.url,
        media.content_type
    );

    if !media.content_type.starts_with("audio") {
        return CONFIG.texts.audio_only.to_owned();
    }

    match audio.fetch_and_store(twilio, &media.url, &message.sid).await {
        Ok(path) => {
            log::info!("Saved audio for message {} to {}", message.sid, path.display());
            CONFIG.texts.audio_saved.to_owned()
        }
        Err(e) => {
            log::error!("Failed to process audio for message {}: {e}", message.sid);
            CONFIG.texts.audio_failed.to_owned()
        }
    }
}
