//! Opening inputs with a fixed-capacity read buffer.
//!
//! `-` names standard input, so any operand can be piped. The capacity
//! only bounds read-ahead; lines longer than the buffer still work.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Default read-ahead capacity per input.
pub const DEFAULT_READ_BUF_BYTES: usize = 64 * 1024;

/// Open `path` (or stdin for `-`) as a buffered byte source.
pub fn open_input(path: &Path, capacity: usize) -> io::Result<BufReader<Box<dyn Read>>> {
    let inner: Box<dyn Read> = if path.as_os_str() == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(path)?)
    };
    Ok(BufReader::with_capacity(capacity, inner))
}
