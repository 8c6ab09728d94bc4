//! A pull cursor over newline-terminated lines that reads each line into
//! a caller-supplied buffer, avoiding per-row allocation.

use std::io::{self, BufRead};

/// Wraps a reader; each `read_line` call fills `buf` with the next line
/// (including its trailing newline, if the input has one).
pub struct LineCursor<R> {
    inner: R,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(inner: R) -> Self {
        LineCursor { inner }
    }

    /// Read the next line into `buf`. Returns `false` at end of input.
    /// The final line of a file without a trailing newline is still
    /// yielded.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let n = self.inner.read_until(b'\n', buf)?;
        Ok(n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yields_lines_and_then_eof() {
        let mut lc = LineCursor::new(Cursor::new(&b"a\tb\nc\td\n"[..]));
        let mut buf = Vec::new();
        assert!(lc.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"a\tb\n");
        assert!(lc.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"c\td\n");
        assert!(!lc.read_line(&mut buf).unwrap());
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let mut lc = LineCursor::new(Cursor::new(&b"x\ty"[..]));
        let mut buf = Vec::new();
        assert!(lc.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"x\ty");
        assert!(!lc.read_line(&mut buf).unwrap());
    }
}
