//! Outer-join emission: matched rows are the unified key followed by the
//! left value block and the right value block, each side in its own
//! column order. Unmatched rows are kept only when that side's outer
//! flag is set, with the absent side padded by empty fields.

use std::io::{self, Write};

use tabrec_core::{HeaderDict, Row};

use crate::policy::EmitPolicy;
use crate::producer::SideMeta;

pub struct JoinPolicy<W> {
    out: W,
    keep_left: bool,
    keep_right: bool,
    left: SideMeta,
    right: SideMeta,
}

impl<W: Write> JoinPolicy<W> {
    pub fn new(out: W, keep_left: bool, keep_right: bool, left: SideMeta, right: SideMeta) -> Self {
        JoinPolicy {
            out,
            keep_left,
            keep_right,
            left,
            right,
        }
    }

    /// Unified header: key names, left value names, right value names.
    pub fn write_col_names(&mut self, dict: &HeaderDict, key_dict: &[usize]) -> io::Result<()> {
        for (i, &d) in key_dict.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b"\t")?;
            }
            self.out.write_all(dict.name(d))?;
        }
        for &d in self.left.value_dict.iter().chain(&self.right.value_dict) {
            self.out.write_all(b"\t")?;
            self.out.write_all(dict.name(d))?;
        }
        self.out.write_all(b"\n")
    }

    fn write_values(&mut self, row: &Row, side: Side) -> io::Result<()> {
        let locals = match side {
            Side::Left => &self.left.value_locals,
            Side::Right => &self.right.value_locals,
        };
        for &c in locals {
            self.out.write_all(b"\t")?;
            self.out.write_all(row.field(c))?;
        }
        Ok(())
    }

    fn write_padding(&mut self, side: Side) -> io::Result<()> {
        let n = match side {
            Side::Left => self.left.value_locals.len(),
            Side::Right => self.right.value_locals.len(),
        };
        for _ in 0..n {
            self.out.write_all(b"\t")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<W: Write> EmitPolicy for JoinPolicy<W> {
    fn matched(&mut self, left: &Row, right: &Row) -> io::Result<()> {
        self.out.write_all(&left.key)?;
        self.write_values(left, Side::Left)?;
        self.write_values(right, Side::Right)?;
        self.out.write_all(b"\n")
    }

    fn left_only(&mut self, left: &Row) -> io::Result<()> {
        if !self.keep_left {
            return Ok(());
        }
        self.out.write_all(&left.key)?;
        self.write_values(left, Side::Left)?;
        self.write_padding(Side::Right)?;
        self.out.write_all(b"\n")
    }

    fn right_only(&mut self, right: &Row) -> io::Result<()> {
        if !self.keep_right {
            return Ok(());
        }
        self.out.write_all(&right.key)?;
        self.write_padding(Side::Left)?;
        self.write_values(right, Side::Right)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
