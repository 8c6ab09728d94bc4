#![forbid(unsafe_code)]
//! tabrec-engine: the key-ordered dual-stream reconciliation engine and
//! the rbind operator.
//!
//! One logical thread of control: the coordinator pulls two producers in
//! lockstep, never holding more than one unconsumed row per side, so
//! memory stays O(line length) per side plus O(schema size) for the
//! dictionary and permutations.

pub mod error;
pub mod options;
pub mod policy;
pub mod producer;
pub mod rbind;
pub mod reconcile;
pub mod run;

pub use error::{EngineError, Result};
pub use options::{BindOptions, DiffOptions, MergeOptions, ReadOptions, SummaryFormat};
pub use rbind::rbind;
pub use run::{changes, merge};
