use crate::{corpus, CONFIG};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// What a matched rule answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Greeting,
    RandomPhrase,
    Help,
    Status,
}

/// A keyword rule. The rule matches when the lowercased message contains any
/// of its keywords.
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub reply: Reply,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Evaluated in order, the first matching rule answers.
pub static RULES: &[Rule] = &[
    Rule {
        keywords: &["olá", "oi", "começar"],
        reply: Reply::Greeting,
    },
    Rule {
        keywords: &["estou pronto"],
        reply: Reply::RandomPhrase,
    },
    Rule {
        keywords: &["ajuda"],
        reply: Reply::Help,
    },
    Rule {
        keywords: &["status"],
        reply: Reply::Status,
    },
];

/// Picks the reply for an inbound text message.
pub struct Responder {
    corpus_path: PathBuf,
    rng: Mutex<StdRng>,
}

impl Responder {
    /// Creates a responder whose generator is seeded from the current time.
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(corpus_path, seed)
    }

    pub fn with_seed(corpus_path: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            corpus_path: corpus_path.into(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        RULES
    }

    pub async fn select_reply(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        let Some(rule) = self.rules().iter().find(|rule| rule.matches(&lowered)) else {
            return CONFIG.texts.echo.replace("$message", text);
        };

        log::debug!("Message matched the {:?} rule", rule.reply);
        match rule.reply {
            Reply::Greeting => CONFIG.texts.greeting.to_owned(),
            Reply::RandomPhrase => self.random_phrase().await,
            Reply::Help => CONFIG.texts.help.to_owned(),
            Reply::Status => CONFIG.texts.status.to_owned(),
        }
    }

    /// The corpus is read from disk on every call so edits apply immediately.
    async fn random_phrase(&self) -> String {
        let phrases = match corpus::load(&self.corpus_path).await {
            Ok(phrases) => phrases,
            Err(e) => {
                log::error!(
                    "Failed to read the phrase corpus at {}: {e}",
                    self.corpus_path.display()
                );
                return CONFIG.texts.corpus_unavailable.to_owned();
            }
        };

        if phrases.is_empty() {
            log::warn!("Phrase corpus at {} is empty", self.corpus_path.display());
            return CONFIG.texts.corpus_empty.to_owned();
        }

        let index = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .random_range(0..phrases.len());

        CONFIG.texts.record_phrase.replace("$phrase", &phrases[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn responder_with_corpus(contents: &str) -> (TempDir, Responder) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frases.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, Responder::with_seed(path, 7))
    }

    fn record_reply(phrase: &str) -> String {
        CONFIG.texts.record_phrase.replace("$phrase", phrase)
    }

    #[tokio::test]
    async fn greeting_keywords() {
        let (_dir, responder) = responder_with_corpus("");
        for text in ["Olá", "oi!", "OI", "quero começar", "COMEÇAR agora"] {
            assert_eq!(
                responder.select_reply(text).await,
                CONFIG.texts.greeting,
                "{text}"
            );
        }
    }

    #[tokio::test]
    async fn greeting_takes_precedence_over_help() {
        let (_dir, responder) = responder_with_corpus("");
        assert_eq!(responder.select_reply("oi, ajuda").await, CONFIG.texts.greeting);
    }

    #[tokio::test]
    async fn help_and_status() {
        let (_dir, responder) = responder_with_corpus("");
        assert_eq!(responder.select_reply("Preciso de AJUDA").await, CONFIG.texts.help);
        assert_eq!(responder.select_reply("STATUS").await, CONFIG.texts.status);
        assert_eq!(
            responder.select_reply("status").await,
            responder.select_reply("status").await
        );
    }

    #[tokio::test]
    async fn ready_returns_a_phrase_from_the_corpus() {
        let (_dir, responder) = responder_with_corpus("  frase um  \n\nfrase dois\n");
        let reply = responder.select_reply("Estou pronto").await;
        assert!(
            reply == record_reply("frase um") || reply == record_reply("frase dois"),
            "unexpected reply: {reply}"
        );
    }

    #[tokio::test]
    async fn ready_eventually_draws_every_phrase() {
        let phrases = ["a casa é azul", "o céu está limpo", "bom trabalho"];
        let (_dir, responder) = responder_with_corpus(&phrases.join("\n"));

        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(responder.select_reply("estou pronto").await);
        }

        let expected: HashSet<String> = phrases.iter().map(|p| record_reply(p)).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn phrase_is_embedded_verbatim() {
        let (_dir, responder) = responder_with_corpus("a <b> & \"c\"\n");
        assert_eq!(
            responder.select_reply("estou pronto").await,
            record_reply("a <b> & \"c\"")
        );
    }

    #[tokio::test]
    async fn ready_with_empty_corpus() {
        let (_dir, responder) = responder_with_corpus("\n  \n");
        assert_eq!(responder.select_reply("estou pronto").await, CONFIG.texts.corpus_empty);
    }

    #[tokio::test]
    async fn ready_with_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let responder = Responder::with_seed(dir.path().join("missing.txt"), 7);
        assert_eq!(
            responder.select_reply("estou pronto").await,
            CONFIG.texts.corpus_unavailable
        );
    }

    #[tokio::test]
    async fn unmatched_text_is_echoed_as_sent() {
        let (_dir, responder) = responder_with_corpus("");
        assert_eq!(
            responder.select_reply("Bom Dia").await,
            CONFIG.texts.echo.replace("$message", "Bom Dia")
        );
    }

    #[tokio::test]
    async fn select_reply_is_total() {
        let (_dir, responder) = responder_with_corpus("");
        for text in ["", "?!...", "日本語", "🎙️", "   "] {
            assert!(!responder.select_reply(text).await.is_empty(), "{text:?}");
        }
    }

    #[test]
    fn rule_order() {
        let replies: Vec<_> = RULES.iter().map(|rule| rule.reply).collect();
        assert_eq!(
            replies,
            [Reply::Greeting, Reply::RandomPhrase, Reply::Help, Reply::Status]
        );
    }
}
