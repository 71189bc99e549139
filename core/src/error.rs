use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;

/// Why a username-only login was refused.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter your username.")]
    EmptyUsername,

    #[error("User not found. Check the username.")]
    UnknownUser,

    #[error("Could not verify the user right now.")]
    Unavailable,
}
