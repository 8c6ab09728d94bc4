//! Per-input stream producer.
//!
//! Each producer encapsulates one input as a pull source of row records.
//! At construction it probes the first line for the schema width,
//! resolves its side of the formula, interns its column names into the
//! shared dictionary, and computes the value-column complement plus the
//! local-column ↔ dictionary permutations. After that, `advance` reads
//! one line at a time into the reused row buffer and rebuilds the join
//! key; the producer holds exactly one unconsumed row.
//!
//! Construction order invariant: side 0 is built first against an empty
//! dictionary, so its join and context names occupy dictionary slots
//! `0..join+context`. Side 1's join and context columns are paired with
//! those slots positionally (the formula matches them token by token;
//! with `left=right` naming the left spelling owns the slot). Value
//! columns unify by name on both sides.

use std::io::BufRead;

use tabrec_core::formula::{Formula, SideColumns};
use tabrec_core::header::{synthetic_name, HeaderDict};
use tabrec_core::row::Row;
use tabrec_core::tokenize;
use tabrec_core::Error;
use tabrec_io::LineCursor;
use tracing::{debug, error};

use crate::error::{EngineError, Result};

pub struct Producer<R> {
    cursor: LineCursor<R>,
    side: usize,
    row: Row,
    cols: SideColumns,
    join_dict: Vec<usize>,
    context_dict: Vec<usize>,
    value_dict: Vec<usize>,
    /// The probed first line still counts as data in headerless mode.
    first_pending: bool,
    live: bool,
    failed: Option<EngineError>,
}

/// One side's emission-relevant shape, snapshotted once the dictionary
/// is complete.
#[derive(Debug, Clone)]
pub struct SideMeta {
    pub join_len: usize,
    pub context_len: usize,
    /// Local value columns in this side's own order.
    pub value_locals: Vec<usize>,
    /// Dictionary index of each value column, parallel to `value_locals`.
    pub value_dict: Vec<usize>,
    /// Dictionary index → local column, `None` where this side has no
    /// such column.
    pub inverse: Vec<Option<usize>>,
}

impl<R: BufRead> Producer<R> {
    pub fn new(
        reader: R,
        side: usize,
        formula: &Formula,
        dict: &mut HeaderDict,
        header: bool,
    ) -> Result<Self> {
        let mut cursor = LineCursor::new(reader);
        let mut row = Row::default();
        if !cursor.read_line(&mut row.line)? {
            return Err(Error::EmptyInput.into());
        }
        let ncols = tokenize::count_columns(&row.line);
        row.ncols = ncols;

        // Header names must outlive the reused line buffer.
        let names: Option<Vec<Vec<u8>>> = if header {
            let mut offs = Vec::new();
            let nf = tokenize::tokenize_into(&mut offs, ncols, &row.line);
            debug_assert_eq!(nf, ncols);
            Some(
                (0..ncols)
                    .map(|i| tokenize::field(&row.line, &offs, i).to_vec())
                    .collect(),
            )
        } else {
            None
        };

        let mut cols = match &names {
            Some(n) => {
                let refs: Vec<&[u8]> = n.iter().map(|v| v.as_slice()).collect();
                formula.resolve(side, Some(&refs))?
            }
            None => formula.resolve(side, None)?,
        };
        cols.finish(ncols)?;

        let name_of = |c: usize| -> Vec<u8> {
            match &names {
                Some(n) => n[c].clone(),
                None => synthetic_name(c),
            }
        };

        let (join_dict, context_dict) = if side == 0 {
            let mut jd = Vec::with_capacity(cols.join.len());
            for &c in &cols.join {
                jd.push(dict.intern(&name_of(c))?);
            }
            let mut cd = Vec::with_capacity(cols.context.len());
            for &c in &cols.context {
                cd.push(dict.intern(&name_of(c))?);
            }
            (jd, cd)
        } else {
            let nj = cols.join.len();
            let nc = cols.context.len();
            ((0..nj).collect(), (nj..nj + nc).collect())
        };
        let mut value_dict = Vec::with_capacity(cols.value.len());
        for &c in &cols.value {
            value_dict.push(dict.intern(&name_of(c))?);
        }

        debug!(
            side,
            ncols,
            join = cols.join.len(),
            context = cols.context.len(),
            values = cols.value.len(),
            header,
            "stream producer ready"
        );

        Ok(Producer {
            cursor,
            side,
            row,
            cols,
            join_dict,
            context_dict,
            value_dict,
            first_pending: !header,
            live: true,
            failed: None,
        })
    }

    /// Pull the next row. Returns `false` once the stream is exhausted or
    /// has failed; after a failure [`take_failure`](Self::take_failure)
    /// yields the recorded error.
    pub fn advance(&mut self) -> bool {
        if !self.live {
            return false;
        }
        let have = if self.first_pending {
            self.first_pending = false;
            true
        } else {
            match self.cursor.read_line(&mut self.row.line) {
                Ok(have) => have,
                Err(e) => {
                    self.failed = Some(e.into());
                    self.live = false;
                    return false;
                }
            }
        };
        if !have {
            self.live = false;
            return false;
        }
        self.row.lineno += 1;
        let nf = self.row.retokenize(&self.cols.join);
        if nf < self.row.ncols {
            error!(
                side = self.side,
                line = self.row.lineno,
                got = nf,
                want = self.row.ncols,
                "short row, stopping stream"
            );
            self.failed = Some(
                Error::ShortRow {
                    line: self.row.lineno,
                    got: nf,
                    want: self.row.ncols,
                }
                .into(),
            );
            self.live = false;
            return false;
        }
        true
    }

    /// The current row; valid after `advance` returned `true`.
    pub fn current(&self) -> &Row {
        &self.row
    }

    pub fn take_failure(&mut self) -> Option<EngineError> {
        self.failed.take()
    }

    /// Snapshot the side's shape; call only once the dictionary holds
    /// both sides' names.
    pub fn meta(&self, dict_len: usize) -> SideMeta {
        let mut inverse = vec![None; dict_len];
        for (&d, &l) in self.join_dict.iter().zip(&self.cols.join) {
            inverse[d] = Some(l);
        }
        for (&d, &l) in self.context_dict.iter().zip(&self.cols.context) {
            inverse[d] = Some(l);
        }
        for (&d, &l) in self.value_dict.iter().zip(&self.cols.value) {
            inverse[d] = Some(l);
        }
        SideMeta {
            join_len: self.join_dict.len(),
            context_len: self.context_dict.len(),
            value_locals: self.cols.value.clone(),
            value_dict: self.value_dict.clone(),
            inverse,
        }
    }

    pub fn join_dict(&self) -> &[usize] {
        &self.join_dict
    }
}
