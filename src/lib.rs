//! Streaming relational operators over key-sorted tab-separated text.
//!
//! This facade re-exports the engine's operator entry points and their
//! option types; the implementation lives in the `crates/` members.

pub use tabrec_core::{Error, Formula, HeaderDict, Row};
pub use tabrec_engine::{
    changes, merge, rbind, BindOptions, DiffOptions, EngineError, MergeOptions, ReadOptions,
    SummaryFormat,
};
pub use tabrec_io::open_input;
