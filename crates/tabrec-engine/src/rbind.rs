//! Row-bind: concatenate any number of inputs by unified schema.
//!
//! The first line of every input is read as its header and interned, so
//! the dictionary fixes a unified column order before any data flows.
//! Rows are then re-emitted with columns rearranged to dictionary order,
//! empty fields where an input lacks a column. Inputs already laid out
//! in dictionary order take a fast path that appends the padding to the
//! raw line.

use std::io::{BufRead, Write};

use tabrec_core::{tokenize, Error, HeaderDict};
use tabrec_io::LineCursor;
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::options::BindOptions;

struct BindInput<R> {
    cursor: LineCursor<R>,
    ncols: usize,
    /// Local column → dictionary index.
    perm: Vec<usize>,
}

pub fn rbind<R, W>(inputs: Vec<R>, opts: &BindOptions, mut out: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut dict = HeaderDict::new();
    let mut bound = Vec::with_capacity(inputs.len());
    let mut buf = Vec::new();
    let mut offs = Vec::new();

    // Pass 1: unify every input's header before any data is emitted.
    for (idx, reader) in inputs.into_iter().enumerate() {
        let mut cursor = LineCursor::new(reader);
        if !cursor.read_line(&mut buf)? {
            warn!(input = idx, "empty input, skipping");
            continue;
        }
        let ncols = tokenize::count_columns(&buf);
        tokenize::tokenize_into(&mut offs, ncols, &buf);
        let mut perm = Vec::with_capacity(ncols);
        for i in 0..ncols {
            perm.push(dict.intern(tokenize::field(&buf, &offs, i))?);
        }
        bound.push(BindInput {
            cursor,
            ncols,
            perm,
        });
    }

    if opts.col_names && !dict.is_empty() {
        out.write_all(&dict.header_line())?;
    }

    // Pass 2: stream each input through its permutation. A short row
    // aborts that input but later inputs still run; the first recorded
    // error decides the exit code.
    let nhof = dict.len();
    let mut first_err: Option<EngineError> = None;
    for input in &mut bound {
        if let Err(e) = copy_input(input, nhof, &mut buf, &mut offs, &mut out) {
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
    }
    out.flush()?;
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn copy_input<R, W>(
    input: &mut BindInput<R>,
    nhof: usize,
    buf: &mut Vec<u8>,
    offs: &mut Vec<usize>,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let ncols = input.ncols;
    let identity = input.perm.iter().enumerate().all(|(i, &d)| i == d);
    let mut inverse = vec![None; nhof];
    for (local, &d) in input.perm.iter().enumerate() {
        inverse[d] = Some(local);
    }

    // Physical line number; the header was line 1.
    let mut lineno: u64 = 1;
    while input.cursor.read_line(buf)? {
        lineno += 1;
        let nf = tokenize::tokenize_into(offs, ncols, buf);
        if nf < ncols {
            return Err(Error::ShortRow {
                line: lineno,
                got: nf,
                want: ncols,
            }
            .into());
        }
        if identity {
            out.write_all(&buf[..offs[ncols] - 1])?;
            for _ in ncols..nhof {
                out.write_all(b"\t")?;
            }
            out.write_all(b"\n")?;
        } else {
            for (i, local) in inverse.iter().enumerate() {
                if i > 0 {
                    out.write_all(b"\t")?;
                }
                if let Some(c) = local {
                    out.write_all(tokenize::field(buf, offs, *c))?;
                }
            }
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(inputs: &[&str], col_names: bool) -> (Vec<u8>, Result<()>) {
        let readers: Vec<Cursor<Vec<u8>>> = inputs
            .iter()
            .map(|s| Cursor::new(s.as_bytes().to_vec()))
            .collect();
        let opts = BindOptions {
            col_names,
            ..Default::default()
        };
        let mut out = Vec::new();
        let r = rbind(readers, &opts, &mut out);
        (out, r)
    }

    #[test]
    fn identical_schemas_concatenate() {
        let (out, r) = run(&["a\tb\n1\t2\n", "a\tb\n3\t4\n"], true);
        r.unwrap();
        assert_eq!(out, b"a\tb\n1\t2\n3\t4\n");
    }

    #[test]
    fn disjoint_columns_pad_with_empties() {
        let (out, r) = run(&["a\n1\n", "b\n2\n"], true);
        r.unwrap();
        assert_eq!(out, b"a\tb\n1\t\n\t2\n");
    }

    #[test]
    fn reordered_schema_is_permuted_into_unified_order() {
        let (out, r) = run(&["a\tb\n1\t2\n", "b\ta\n3\t4\n"], false);
        r.unwrap();
        assert_eq!(out, b"1\t2\n4\t3\n");
    }

    #[test]
    fn short_row_aborts_that_input_only() {
        let (out, r) = run(&["a\tb\n1\t2\nonly_one\n", "a\tb\n9\t8\n"], false);
        let err = r.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(out, b"1\t2\n9\t8\n");
    }
}
