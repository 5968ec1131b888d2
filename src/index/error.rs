use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Entry at `position` (0-based, in load order) cannot be indexed
    #[error("Malformed entry at position {position}: {reason}")]
    MalformedEntry { position: usize, reason: String },

    #[error("Symbol not found: {0}")]
    NotFound(String),
}

pub type IndexResult<T> = Result<T, IndexError>;
