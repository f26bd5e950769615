mod message;

pub use message::Message;

pub trait Action {
    fn as_twiml(&self) -> String;
}

/// A TwiML response document built from a sequence of verbs.
#[derive(Debug, Default)]
pub struct Twiml {
    body: String,
}

impl Twiml {
    pub fn new() -> Twiml {
        Twiml::default()
    }

    pub fn add(&mut self, a: &dyn Action) -> &mut Twiml {
        self.body.push_str(&a.as_twiml());
        self
    }

    pub fn as_twiml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response>{}</Response>"#,
            self.body
        )
    }
}

// Text is inserted as-is.
fn format_xml_string(tag: &str, inner: &str) -> String {
    format!("<{tag}>{inner}</{tag}>")
}
