use crate::{Client, TwilioError};
use reqwest::{Response, StatusCode};

impl Client {
    /// Requests a media resource referenced by an inbound message. The body is
    /// left unread so the caller can stream it.
    pub async fn download_media(&self, url: &str) -> Result<Response, TwilioError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_id, Some(&self.auth_token))
            .send()
            .await
            .map_err(TwilioError::ReqwestError)?;

        match response.status() {
            StatusCode::OK => Ok(response),
            other => Err(TwilioError::HTTPError(other)),
        }
    }
}
