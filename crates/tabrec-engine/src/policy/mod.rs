//! Emission policies invoked by the coordinator.

use std::io;

use tabrec_core::Row;

pub mod diff;
pub mod join;

pub use diff::DiffPolicy;
pub use join::JoinPolicy;

/// What to do with each classified row pair. Policies own the output
/// writer; `finish` runs after both streams are drained.
pub trait EmitPolicy {
    fn matched(&mut self, left: &Row, right: &Row) -> io::Result<()>;
    fn left_only(&mut self, left: &Row) -> io::Result<()>;
    fn right_only(&mut self, right: &Row) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}
