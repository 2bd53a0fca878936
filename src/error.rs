use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid Riot ID \"{0}\". Use format: Name#TAG")]
    InvalidRiotId(String),

    #[error("Failed to resolve {handle}: {reason}")]
    LookupError { handle: String, reason: String },

    #[error("Failed to fetch {what}: {reason}")]
    RetrievalError { what: String, reason: String },

    #[error("Skipped match {match_id}: {reason}")]
    SkippedMatch { match_id: String, reason: String },

    #[error("Invalid request: {0}")]
    PreconditionError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Scrim data error: {0}")]
    ScrimError(String),
}

impl AppError {
    /// Hard failures abort the call; everything else is reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::ConfigError(_) | AppError::PreconditionError(_))
    }
}
