/// All errors that can be returned by a FunnelStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored document failed to encode or decode.
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// A backend-specific storage error (engine fault, I/O, task join).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}
