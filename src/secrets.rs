use std::env::var;

#[derive(Debug, Clone)]
pub struct Secrets {
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

impl Secrets {
    pub fn from_env() -> Result<Self, SecretsError> {
        Self::from_lookup(|key| var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SecretsError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(SecretsError::Missing(key))
        };

        Ok(Self {
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
        })
    }
}
