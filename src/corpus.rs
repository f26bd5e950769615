use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads the phrase corpus: one phrase per line, surrounding whitespace
/// trimmed and blank lines skipped. An empty corpus is not an error.
pub async fn load(path: &Path) -> io::Result<Vec<String>> {
    let mut lines = BufReader::new(File::open(path).await?).lines();

    let mut phrases = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let phrase = line.trim();
        if !phrase.is_empty() {
            phrases.push(phrase.to_owned());
        }
    }

    Ok(phrases)
}
