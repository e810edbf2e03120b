use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique column already holds this value.
    #[error("{field} '{value}' is already taken")]
    Conflict { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Auth error: {0}")]
    Auth(String),
}

impl FolioError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        FolioError::NotFound(what.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FolioError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
