use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] tabrec_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Process exit code: 2 only for a malformed row mid-stream,
    /// 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::Core(e) => e.exit_code(),
            EngineError::Io(_) => 1,
        }
    }
}
