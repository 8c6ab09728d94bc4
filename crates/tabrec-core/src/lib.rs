#![forbid(unsafe_code)]
//! tabrec-core: the pure, I/O-free layer of the tabrec operators.
//!
//! Design intent:
//! - Everything here works on byte slices of one line at a time; nothing
//!   materializes a table.
//! - Column references are resolved once per input (formula + header
//!   dictionary), then the per-row path is offset arithmetic only.

pub mod error;
pub mod formula;
pub mod header;
pub mod row;
pub mod tokenize;

pub use error::{Error, Result};
pub use formula::{Formula, SideColumns};
pub use header::HeaderDict;
pub use row::Row;
