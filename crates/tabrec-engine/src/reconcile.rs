//! The merge coordinator: a 3-way streaming comparison over two
//! key-ordered producers.
//!
//! States are implicit in control flow: both sides live, one side
//! draining, done. While both are live the current keys are compared
//! byte-wise; the behind side is pulled in a tight inner loop until it
//! catches up or exhausts, so a long run of unmatched rows costs one
//! comparison per row rather than re-entering the outer dispatch.
//!
//! Precondition: within each stream, successive keys are non-decreasing
//! under byte-wise order. This is not verified; unsorted input yields
//! undefined interleaving.

use std::cmp::Ordering;
use std::io::BufRead;

use tracing::debug;

use crate::error::Result;
use crate::policy::EmitPolicy;
use crate::producer::Producer;

pub fn reconcile<RL, RR, P>(
    left: &mut Producer<RL>,
    right: &mut Producer<RR>,
    policy: &mut P,
) -> Result<()>
where
    RL: BufRead,
    RR: BufRead,
    P: EmitPolicy,
{
    let mut lx = left.advance();
    let mut ly = right.advance();

    while lx && ly {
        match left.current().key.cmp(&right.current().key) {
            Ordering::Less => loop {
                policy.left_only(left.current())?;
                lx = left.advance();
                if !lx || left.current().key >= right.current().key {
                    break;
                }
            },
            Ordering::Greater => loop {
                policy.right_only(right.current())?;
                ly = right.advance();
                if !ly || right.current().key >= left.current().key {
                    break;
                }
            },
            Ordering::Equal => {
                policy.matched(left.current(), right.current())?;
                lx = left.advance();
                ly = right.advance();
            }
        }
    }

    if lx {
        debug!("right stream exhausted, draining left");
        while lx {
            policy.left_only(left.current())?;
            lx = left.advance();
        }
    } else if ly {
        debug!("left stream exhausted, draining right");
        while ly {
            policy.right_only(right.current())?;
            ly = right.advance();
        }
    }
    policy.finish()?;

    // Output already committed stays on stdout; a recorded row-shape
    // failure is surfaced only now.
    if let Some(e) = left.take_failure() {
        return Err(e);
    }
    if let Some(e) = right.take_failure() {
        return Err(e);
    }
    Ok(())
}
