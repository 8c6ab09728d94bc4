use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot interpret formula: {0}")]
    Formula(String),

    #[error("fewer columns present than needed for formula")]
    Schema,

    #[error("zero length column name not allowed")]
    EmptyName,

    /// A data line with fewer fields than the schema width established by
    /// the first line. Carries the 1-based data line number.
    #[error("line {line} has only {got} columns, expected {want}")]
    ShortRow { line: u64, got: usize, want: usize },

    #[error("cannot read lines")]
    EmptyInput,
}

impl Error {
    /// Process exit code for this error class: 1 for anything detected at
    /// startup, 2 for a malformed row mid-stream.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ShortRow { .. } => 2,
            _ => 1,
        }
    }
}
