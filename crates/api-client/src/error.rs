use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the risk service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status. `message` is already the
    /// most specific text the service offered.
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Failed to build the request: {0}")]
    InvalidRequest(String),

    #[error("Invalid client configuration: {0}")]
    Configuration(#[from] configuration::error::ConfigError),
}

impl ApiError {
    /// The text to show the user: the service's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Service { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
