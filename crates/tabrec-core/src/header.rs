//! Unified header dictionary: an append-only, insertion-ordered string
//! table shared by both sides of a reconciliation (and by every input of
//! an rbind).
//!
//! Interning is idempotent: inserting an existing name returns its
//! existing index. Entries are never removed; indices are stable for the
//! lifetime of a run. The lookup is an exact whole-name match, so "a"
//! and "ab" can never alias.

use std::collections::HashMap;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct HeaderDict {
    names: Vec<Box<[u8]>>,
    index: HashMap<Box<[u8]>, usize>,
}

impl HeaderDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning its stable index. Empty names are
    /// rejected so that an empty header cell fails loudly at startup
    /// rather than colliding silently.
    pub fn intern(&mut self, name: &[u8]) -> Result<usize> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if let Some(&i) = self.index.get(name) {
            return Ok(i);
        }
        let i = self.names.len();
        let owned: Box<[u8]> = name.into();
        self.names.push(owned.clone());
        self.index.insert(owned, i);
        Ok(i)
    }

    pub fn lookup(&self, name: &[u8]) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, i: usize) -> &[u8] {
        &self.names[i]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The unified header line: all names in insertion order, tab-joined,
    /// newline-terminated.
    pub fn header_line(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, n) in self.names.iter().enumerate() {
            if i > 0 {
                out.push(b'\t');
            }
            out.extend_from_slice(n);
        }
        out.push(b'\n');
        out
    }
}

/// Synthesize the positional column name used when an input has no
/// header line: `V1`, `V2`, ...
pub fn synthetic_name(pos: usize) -> Vec<u8> {
    format!("V{}", pos + 1).into_bytes()
}
