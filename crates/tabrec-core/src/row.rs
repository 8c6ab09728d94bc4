//! Reusable row buffer: one owned line plus its ephemeral offset table
//! and the derived join key.
//!
//! The buffers are recycled for every line of a stream; offsets are only
//! valid for the line currently held. The key is the tab-joined
//! projection of the join columns and is rebuilt per row — it is compared
//! on raw bytes, never trimmed.

use crate::tokenize;

#[derive(Debug, Default)]
pub struct Row {
    /// The raw line, possibly still newline-terminated.
    pub line: Vec<u8>,
    /// `[start_0, ..., start_n, end]` field boundaries for `line`.
    pub offsets: Vec<usize>,
    /// Schema width established by the stream's first line.
    pub ncols: usize,
    /// 1-based data line number within the stream.
    pub lineno: u64,
    /// Tab-joined join-column projection, no trailing delimiter.
    pub key: Vec<u8>,
}

impl Row {
    pub fn new(ncols: usize) -> Self {
        Row {
            line: Vec::new(),
            offsets: Vec::with_capacity(ncols + 1),
            ncols,
            lineno: 0,
            key: Vec::new(),
        }
    }

    /// Borrow field `col`; caller guarantees `col < ncols`.
    pub fn field(&self, col: usize) -> &[u8] {
        tokenize::field(&self.line, &self.offsets, col)
    }

    /// NA means the cell is absent for this row: no column mapping at all
    /// or an empty field. Two NAs never count as a change.
    pub fn is_na(&self, col: Option<usize>) -> bool {
        match col {
            None => true,
            Some(c) => c >= self.ncols || self.offsets[c] + 1 == self.offsets[c + 1],
        }
    }

    /// Retokenize the held line and rebuild the key from `join_cols`.
    /// Returns the field count so the caller can detect short rows.
    pub fn retokenize(&mut self, join_cols: &[usize]) -> usize {
        let nf = tokenize::tokenize_into(&mut self.offsets, self.ncols, &self.line);
        if nf < self.ncols {
            return nf;
        }
        self.key.clear();
        for (i, &c) in join_cols.iter().enumerate() {
            if i > 0 {
                self.key.push(b'\t');
            }
            self.key
                .extend_from_slice(tokenize::field(&self.line, &self.offsets, c));
        }
        nf
    }
}
