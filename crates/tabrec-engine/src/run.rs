//! Operator entry points: wire a formula, a dictionary, two producers,
//! and an emission policy into one reconciliation pass.

use std::io::{BufRead, Write};

use tabrec_core::{Formula, HeaderDict};

use crate::error::Result;
use crate::options::{DiffOptions, MergeOptions};
use crate::policy::{DiffPolicy, JoinPolicy};
use crate::producer::Producer;
use crate::reconcile::reconcile;

/// Streaming outer join of two key-sorted inputs.
pub fn merge<RL, RR, W>(left: RL, right: RR, spec: &str, opts: &MergeOptions, out: W) -> Result<()>
where
    RL: BufRead,
    RR: BufRead,
    W: Write,
{
    let formula = Formula::parse(spec)?;
    if !opts.read.header {
        // Speculative pass: headerless formulas must be fully numeric.
        formula.resolve(0, None)?;
        formula.resolve(1, None)?;
    }

    let mut dict = HeaderDict::new();
    let mut px = Producer::new(left, 0, &formula, &mut dict, opts.read.header)?;
    let mut py = Producer::new(right, 1, &formula, &mut dict, opts.read.header)?;

    let lm = px.meta(dict.len());
    let rm = py.meta(dict.len());
    let mut policy = JoinPolicy::new(out, opts.keep_left, opts.keep_right, lm, rm);
    if opts.col_names {
        let key_dict = px.join_dict().to_vec();
        policy.write_col_names(&dict, &key_dict)?;
    }
    reconcile(&mut px, &mut py, &mut policy)
}

/// Streaming row diff of two key-sorted inputs.
pub fn changes<RL, RR, W>(left: RL, right: RR, spec: &str, opts: &DiffOptions, out: W) -> Result<()>
where
    RL: BufRead,
    RR: BufRead,
    W: Write,
{
    let formula = Formula::parse(spec)?;
    if !opts.read.header {
        formula.resolve(0, None)?;
        formula.resolve(1, None)?;
    }

    let mut dict = HeaderDict::new();
    let mut px = Producer::new(left, 0, &formula, &mut dict, opts.read.header)?;
    let mut py = Producer::new(right, 1, &formula, &mut dict, opts.read.header)?;

    let lm = px.meta(dict.len());
    let rm = py.meta(dict.len());
    let mut policy = DiffPolicy::new(out, opts.summary, lm, rm);
    if opts.col_names && opts.summary.is_none() {
        policy.write_col_names(&dict)?;
    }
    reconcile(&mut px, &mut py, &mut policy)
}
