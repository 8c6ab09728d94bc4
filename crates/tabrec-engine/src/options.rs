//! Option structs for the three operators. Serde-derived so a caller can
//! persist or deserialize a run configuration; defaults match the bare
//! command-line invocation.

use serde::{Deserialize, Serialize};

use tabrec_io::DEFAULT_READ_BUF_BYTES;

/// Input interpretation shared by merge and changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Treat the first line of each input as a header.
    pub header: bool,
    /// Read-ahead capacity per input, in bytes.
    pub buffer_bytes: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            header: false,
            buffer_bytes: DEFAULT_READ_BUF_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeOptions {
    pub read: ReadOptions,
    /// Emit the unified column names before the data.
    pub col_names: bool,
    /// Keep unmatched left rows (left outer).
    pub keep_left: bool,
    /// Keep unmatched right rows (right outer).
    pub keep_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryFormat {
    /// Human-readable multi-line tally.
    Report,
    /// One tab-separated line of eight counts.
    Brief,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffOptions {
    pub read: ReadOptions,
    /// Emit the unified column names before the data (listing mode only).
    pub col_names: bool,
    /// Tally classifications instead of listing rows.
    pub summary: Option<SummaryFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindOptions {
    /// Emit the unified column names before the data.
    pub col_names: bool,
    pub buffer_bytes: usize,
}

impl Default for BindOptions {
    fn default() -> Self {
        BindOptions {
            col_names: false,
            buffer_bytes: DEFAULT_READ_BUF_BYTES,
        }
    }
}
