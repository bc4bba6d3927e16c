use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("partial {path} answered HTTP {status}")]
    FragmentStatus { path: String, status: u16 },

    #[error("partial {path} could not be fetched: {reason}")]
    FragmentTransport { path: String, reason: String },

    #[error("invalid site config: {0}")]
    Config(String),

    #[error("browser api failed: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for SiteError {
    fn from(value: serde_json::Error) -> Self {
        SiteError::Config(value.to_string())
    }
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;
