use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteamError {
    #[error("request to the steam api failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Displays the parser message unchanged.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("id not found")]
    NotFound,
    #[error("profile is not public")]
    NotPublic,
}
