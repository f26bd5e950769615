use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::{fs::File, io::AsyncWriteExt};
use twilio::{Client as TwilioClient, TwilioError};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("invalid message id {0:?}")]
    InvalidMessageId(String),
    #[error("failed to download media: {0}")]
    Download(#[from] TwilioError),
    #[error("failed to store audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory where received voice recordings are kept, one `<sid>.ogg` per
/// message.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, message_sid: &str) -> PathBuf {
        self.dir.join(format!("{message_sid}.ogg"))
    }

    /// Downloads `media_url` and streams it into `<dir>/<message_sid>.ogg`,
    /// replacing any earlier file for the same message. Nothing is written
    /// unless the provider answers 200, but a failure while streaming can
    /// leave a partial file behind.
    pub async fn fetch_and_store(
        &self,
        twilio: &TwilioClient,
        media_url: &str,
        message_sid: &str,
    ) -> Result<PathBuf, AudioError> {
        // The sid becomes a file name, it must not reach outside the directory
        if Path::new(message_sid).file_name() != Some(OsStr::new(message_sid)) {
            return Err(AudioError::InvalidMessageId(message_sid.to_owned()));
        }

        let mut response = twilio.download_media(media_url).await?;

        let path = self.path_for(message_sid);
        let mut file = File::create(&path).await?;

        while let Some(chunk) = response.chunk().await.map_err(TwilioError::ReqwestError)? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(path)
    }
}
