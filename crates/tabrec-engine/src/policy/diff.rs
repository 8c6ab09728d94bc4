//! Cell-level change classification between two matched schemas.
//!
//! Every unified value column is classified per matched pair:
//! NA on both sides is not a change, NA on exactly one side is an
//! addition or removal, byte-different values are a change printed as
//! `old => new`. Context-group columns are classified and printed for
//! reference but never decide whether a row is emitted. Rows with no
//! changed value column are suppressed entirely.
//!
//! In summary mode nothing is listed; line and cell tallies are printed
//! once at stream end, either as a human-readable block or as one
//! tab-separated line of eight counts in classification order
//! (equal, removed, added, changed; lines then cells).

use std::io::{self, Write};

use tabrec_core::{HeaderDict, Row};

use crate::options::SummaryFormat;
use crate::policy::EmitPolicy;
use crate::producer::SideMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Equal = 0,
    Removed = 1,
    Added = 2,
    Changed = 3,
}

pub struct DiffPolicy<W> {
    out: W,
    summary: Option<SummaryFormat>,
    left: SideMeta,
    right: SideMeta,
    dict_len: usize,
    /// First dictionary slot that gates emission (past join + context).
    gate: usize,
    /// Scratch classification per dictionary slot, reused across rows.
    kinds: Vec<Change>,
    lines: [u64; 4],
    cells: [u64; 4],
}

impl<W: Write> DiffPolicy<W> {
    pub fn new(out: W, summary: Option<SummaryFormat>, left: SideMeta, right: SideMeta) -> Self {
        let dict_len = left.inverse.len();
        let gate = left.join_len + left.context_len;
        DiffPolicy {
            out,
            summary,
            left,
            right,
            dict_len,
            gate,
            kinds: vec![Change::Equal; dict_len],
            lines: [0; 4],
            cells: [0; 4],
        }
    }

    /// The full dictionary as the unified header (listing mode).
    pub fn write_col_names(&mut self, dict: &HeaderDict) -> io::Result<()> {
        self.out.write_all(&dict.header_line())
    }

    /// Classify all dictionary slots past the join for one matched pair.
    /// Returns whether any gating slot changed.
    fn classify(&mut self, lrow: &Row, rrow: &Row) -> bool {
        for i in self.left.join_len..self.dict_len {
            let cl = self.left.inverse[i];
            let cr = self.right.inverse[i];
            let lv = cl.filter(|&c| !lrow.is_na(Some(c))).map(|c| lrow.field(c));
            let rv = cr.filter(|&c| !rrow.is_na(Some(c))).map(|c| rrow.field(c));
            self.kinds[i] = match (lv, rv) {
                // two NAs is not considered a change
                (None, None) => Change::Equal,
                (Some(_), None) => Change::Removed,
                (None, Some(_)) => Change::Added,
                (Some(a), Some(b)) if a == b => Change::Equal,
                _ => Change::Changed,
            };
        }
        self.kinds[self.gate..self.dict_len]
            .iter()
            .any(|&k| k != Change::Equal)
    }

    fn list_matched(&mut self, lrow: &Row, rrow: &Row) -> io::Result<()> {
        self.out.write_all(b" ")?;
        self.out.write_all(&rrow.key)?;
        for i in self.left.join_len..self.dict_len {
            self.out.write_all(b"\t")?;
            match self.kinds[i] {
                Change::Equal => {}
                Change::Removed => {
                    self.out.write_all(b"-")?;
                    if let Some(c) = self.left.inverse[i] {
                        self.out.write_all(lrow.field(c))?;
                    }
                }
                Change::Added => {
                    self.out.write_all(b"+")?;
                    if let Some(c) = self.right.inverse[i] {
                        self.out.write_all(rrow.field(c))?;
                    }
                }
                Change::Changed => {
                    if let Some(c) = self.left.inverse[i] {
                        self.out.write_all(lrow.field(c))?;
                    }
                    self.out.write_all(b" => ")?;
                    if let Some(c) = self.right.inverse[i] {
                        self.out.write_all(rrow.field(c))?;
                    }
                }
            }
        }
        self.out.write_all(b"\n")
    }

    /// Print a whole unmatched row, one cell per dictionary slot.
    fn list_unmatched(&mut self, row: &Row, meta_is_left: bool, sign: &[u8]) -> io::Result<()> {
        self.out.write_all(sign)?;
        self.out.write_all(&row.key)?;
        let meta = if meta_is_left { &self.left } else { &self.right };
        for i in meta.join_len..self.dict_len {
            self.out.write_all(b"\t")?;
            if let Some(c) = meta.inverse[i] {
                self.out.write_all(row.field(c))?;
            }
        }
        self.out.write_all(b"\n")
    }
}

impl<W: Write> EmitPolicy for DiffPolicy<W> {
    fn matched(&mut self, left: &Row, right: &Row) -> io::Result<()> {
        let changed = self.classify(left, right);
        if self.summary.is_some() {
            if changed {
                self.lines[Change::Changed as usize] += 1;
                for i in self.left.join_len..self.dict_len {
                    self.cells[self.kinds[i] as usize] += 1;
                }
            } else {
                self.lines[Change::Equal as usize] += 1;
            }
            return Ok(());
        }
        if !changed {
            return Ok(());
        }
        self.list_matched(left, right)
    }

    fn left_only(&mut self, left: &Row) -> io::Result<()> {
        if self.summary.is_some() {
            self.lines[Change::Removed as usize] += 1;
            self.cells[Change::Removed as usize] += self.left.value_locals.len() as u64;
            return Ok(());
        }
        self.list_unmatched(left, true, b"-")
    }

    fn right_only(&mut self, right: &Row) -> io::Result<()> {
        if self.summary.is_some() {
            self.lines[Change::Added as usize] += 1;
            self.cells[Change::Added as usize] += self.right.value_locals.len() as u64;
            return Ok(());
        }
        self.list_unmatched(right, false, b"+")
    }

    fn finish(&mut self) -> io::Result<()> {
        match self.summary {
            None => {}
            Some(SummaryFormat::Report) => {
                writeln!(self.out, "{} line(s) added", self.lines[Change::Added as usize])?;
                writeln!(
                    self.out,
                    "{} line(s) removed",
                    self.lines[Change::Removed as usize]
                )?;
                writeln!(
                    self.out,
                    "{} line(s) changed",
                    self.lines[Change::Changed as usize]
                )?;
                writeln!(self.out, "  {} value(s) added", self.cells[Change::Added as usize])?;
                writeln!(
                    self.out,
                    "  {} value(s) removed",
                    self.cells[Change::Removed as usize]
                )?;
                writeln!(
                    self.out,
                    "  {} value(s) changed",
                    self.cells[Change::Changed as usize]
                )?;
            }
            Some(SummaryFormat::Brief) => {
                let all = self.lines.iter().chain(self.cells.iter());
                let joined = all
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join("\t");
                writeln!(self.out, "{}", joined)?;
            }
        }
        self.out.flush()
    }
}

/// Line and cell tallies in classification order; exposed for callers
/// that want the counts without formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffTally {
    pub lines: [u64; 4],
    pub cells: [u64; 4],
}

impl<W> DiffPolicy<W> {
    pub fn tally(&self) -> DiffTally {
        DiffTally {
            lines: self.lines,
            cells: self.cells,
        }
    }
}
