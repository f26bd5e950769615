use super::{format_xml_string, Action};

/// The `<Message>` verb, replying to the sender with a text.
#[derive(Debug, Clone)]
pub struct Message {
    pub txt: String,
}

impl Message {
    pub fn new(txt: impl Into<String>) -> Message {
        Message { txt: txt.into() }
    }
}

impl Action for Message {
    fn as_twiml(&self) -> String {
        format_xml_string("Message", &self.txt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twiml::Twiml;

    #[test]
    fn single_message_reply() {
        let mut twiml = Twiml::new();
        twiml.add(&Message::new("Olá!"));
        assert_eq!(
            twiml.as_twiml(),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>Olá!</Message></Response>"#
        );
    }

    #[test]
    fn text_is_not_escaped() {
        let message = Message::new("a < b & \"c\"");
        assert_eq!(message.as_twiml(), "<Message>a < b & \"c\"</Message>");
    }
}
