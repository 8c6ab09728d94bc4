#![forbid(unsafe_code)]
//! tabrec-io: input plumbing for the streaming operators.
//!
//! Inputs are byte streams read one line at a time into a reused buffer;
//! the read buffer is capacity-capped so in-flight memory stays bounded
//! regardless of input size.

pub mod lines;
pub mod source;

pub use lines::LineCursor;
pub use source::{open_input, DEFAULT_READ_BUF_BYTES};
