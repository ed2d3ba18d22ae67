use thiserror::Error;

/// Errors raised while configuring matching strategies.
///
/// Matching itself never fails; a strategy that cannot answer simply yields
/// no match.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("environment variable {var} holding the API key is not set")]
    MissingApiKey { var: String },

    #[error("invalid remote endpoint '{endpoint}'")]
    InvalidEndpoint { endpoint: String },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;
