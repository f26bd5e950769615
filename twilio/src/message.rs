use crate::{FromMap, TwilioError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub url: String,
    pub content_type: String,
}

/// An inbound SMS/WhatsApp message as delivered to the messaging webhook.
///
/// Twilio omits fields it has no value for, so missing text fields are empty
/// strings. `num_media` is kept as sent; `media` holds every
/// `MediaUrl{N}`/`MediaContentType{N}` pair in index order, an entry exists
/// as soon as either half of the pair is present.
#[derive(Debug, Clone)]
pub struct Message {
    pub from: String,
    pub sid: String,
    pub body: Option<String>,
    pub num_media: String,
    pub media: Vec<Media>,
}

impl Message {
    pub fn has_media(&self) -> bool {
        self.num_media != "0"
    }

    pub fn first_media(&self) -> Option<&Media> {
        self.media.first()
    }
}

impl FromMap for Message {
    fn from_map(mut m: BTreeMap<String, String>) -> Result<Box<Message>, TwilioError> {
        let from = m.remove("From").unwrap_or_default();
        let sid = m.remove("MessageSid").unwrap_or_default();
        let body = m.remove("Body");
        let num_media = m.remove("NumMedia").unwrap_or_default();

        let mut media = Vec::new();
        loop {
            let url = m.remove(&format!("MediaUrl{}", media.len()));
            let content_type = m.remove(&format!("MediaContentType{}", media.len()));
            if url.is_none() && content_type.is_none() {
                break;
            }
            media.push(Media {
                url: url.unwrap_or_default(),
                content_type: content_type.unwrap_or_default(),
            });
        }

        Ok(Box::new(Message {
            from,
            sid,
            body,
            num_media,
            media,
        }))
    }
}
