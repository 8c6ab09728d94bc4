//! The join/diff formula: `join_group [~ context_group]`.
//!
//! Each group is a `+`-separated token list. A token is a 1-based column
//! number, a bare column name, or `left=right` letting the two sides
//! disagree on naming (side `i` takes the `i`-th `=`-part, clamped to
//! the last). Numeric interpretation is tried first; `0` never parses as
//! a column number and falls through to name lookup.
//!
//! Resolution runs per side: numeric tokens need no header, names are
//! looked up in that side's own header fields. Without a header only
//! numeric tokens can succeed, so a name in headerless mode is a startup
//! error. Value columns are the complement of join and context columns,
//! in original column order.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Formula {
    /// `groups[0]` is the join group, `groups[1]` (if present) the
    /// context group; tokens are kept raw and re-interpreted per side.
    groups: Vec<Vec<String>>,
}

/// One side's resolved column sets, all 0-based.
#[derive(Debug, Clone, Default)]
pub struct SideColumns {
    pub join: Vec<usize>,
    pub context: Vec<usize>,
    pub value: Vec<usize>,
}

impl Formula {
    pub fn parse(spec: &str) -> Result<Formula> {
        let groups: Vec<Vec<String>> = spec
            .split('~')
            .map(|g| g.split('+').map(|t| t.to_owned()).collect())
            .collect();
        if groups.len() > 2 {
            return Err(Error::Formula(format!(
                "expected `join [~ context]`, got {} groups",
                groups.len()
            )));
        }
        for g in &groups {
            for t in g {
                if trim_ws(t.as_bytes()).is_empty() {
                    return Err(Error::Formula("empty column token".into()));
                }
            }
        }
        Ok(Formula { groups })
    }

    pub fn has_context(&self) -> bool {
        self.groups.len() > 1
    }

    /// Resolve both groups for one side. `names` is the side's own
    /// header fields; `None` means headerless, where only numeric tokens
    /// resolve. `value` stays empty until [`SideColumns::finish`].
    pub fn resolve(&self, side: usize, names: Option<&[&[u8]]>) -> Result<SideColumns> {
        let join = self.resolve_group(0, side, names)?;
        let context = if self.groups.len() > 1 {
            self.resolve_group(1, side, names)?
        } else {
            Vec::new()
        };
        Ok(SideColumns {
            join,
            context,
            value: Vec::new(),
        })
    }

    fn resolve_group(
        &self,
        group: usize,
        side: usize,
        names: Option<&[&[u8]]>,
    ) -> Result<Vec<usize>> {
        self.groups[group]
            .iter()
            .map(|tok| resolve_token(tok, side, names))
            .collect()
    }
}

fn resolve_token(tok: &str, side: usize, names: Option<&[&[u8]]>) -> Result<usize> {
    // Side i takes the i-th `=`-part; sides beyond the list share the
    // last part.
    let part = tok
        .split('=')
        .nth(side)
        .or_else(|| tok.split('=').next_back())
        .unwrap_or(tok);
    let trimmed = trim_ws(part.as_bytes());

    // Numbers win over identically-spelled names.
    if let Some(col) = parse_column_number(trimmed) {
        return Ok(col);
    }
    if let Some(names) = names {
        if let Some(i) = names.iter().position(|n| *n == trimmed) {
            return Ok(i);
        }
    }
    Err(Error::Formula(format!(
        "cannot resolve column `{}`",
        String::from_utf8_lossy(trimmed)
    )))
}

/// 1-based positive integer, whole token; anything else (including `0`)
/// is not a number.
fn parse_column_number(s: &[u8]) -> Option<usize> {
    if s.is_empty() || !s.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = std::str::from_utf8(s).ok()?.parse().ok()?;
    if n == 0 {
        return None;
    }
    Some(n - 1)
}

fn trim_ws(mut s: &[u8]) -> &[u8] {
    while let [b, rest @ ..] = s {
        if *b != 0 && *b <= b' ' {
            s = rest;
        } else {
            break;
        }
    }
    while let [rest @ .., b] = s {
        if *b != 0 && *b <= b' ' {
            s = rest;
        } else {
            break;
        }
    }
    s
}

impl SideColumns {
    /// Validate against the actual column count and compute the value
    /// complement in original column order.
    pub fn finish(&mut self, ncols: usize) -> Result<()> {
        if self.join.iter().chain(&self.context).any(|&c| c >= ncols) {
            return Err(Error::Schema);
        }
        if self.join.len() + self.context.len() > ncols {
            return Err(Error::Schema);
        }
        self.value = (0..ncols)
            .filter(|c| !self.join.contains(c) && !self.context.contains(c))
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>() -> Vec<&'a [u8]> {
        vec![b"id".as_ref(), b"name", b"age", b"3"]
    }

    #[test]
    fn numeric_tokens_need_no_header() {
        let f = Formula::parse("1+2").unwrap();
        let s = f.resolve(0, None).unwrap();
        assert_eq!(s.join, vec![0, 1]);
    }

    #[test]
    fn names_resolve_against_side_header() {
        let f = Formula::parse("id+age").unwrap();
        let n = names();
        let s = f.resolve(1, Some(&n)).unwrap();
        assert_eq!(s.join, vec![0, 2]);
    }

    #[test]
    fn numbers_beat_identically_spelled_names() {
        // column "3" exists by name, but 3 resolves positionally
        let f = Formula::parse("3").unwrap();
        let n = names();
        assert_eq!(f.resolve(0, Some(&n)).unwrap().join, vec![2]);
    }

    #[test]
    fn zero_is_a_name_not_a_number() {
        let f = Formula::parse("0").unwrap();
        assert!(f.resolve(0, None).is_err());
    }

    #[test]
    fn pairs_split_per_side_and_clamp() {
        let f = Formula::parse("id=key").unwrap();
        let left: Vec<&[u8]> = vec![b"id", b"v"];
        let right: Vec<&[u8]> = vec![b"key", b"v"];
        assert_eq!(f.resolve(0, Some(&left)).unwrap().join, vec![0]);
        assert_eq!(f.resolve(1, Some(&right)).unwrap().join, vec![0]);
        // side 2 of a 2-part token reuses the last part
        assert_eq!(f.resolve(2, Some(&right)).unwrap().join, vec![0]);
    }

    #[test]
    fn context_group_after_tilde() {
        let f = Formula::parse("1~3").unwrap();
        let mut s = f.resolve(0, None).unwrap();
        assert_eq!(s.context, vec![2]);
        s.finish(4).unwrap();
        assert_eq!(s.value, vec![1, 3]);
    }

    #[test]
    fn names_without_header_fail() {
        let f = Formula::parse("id").unwrap();
        assert!(f.resolve(0, None).is_err());
    }

    #[test]
    fn whitespace_trimmed_around_tokens() {
        let f = Formula::parse(" id + 2 ").unwrap();
        let n = names();
        assert_eq!(f.resolve(0, Some(&n)).unwrap().join, vec![0, 1]);
    }

    #[test]
    fn finish_rejects_out_of_range() {
        let f = Formula::parse("5").unwrap();
        let mut s = f.resolve(0, None).unwrap();
        assert!(matches!(s.finish(3), Err(Error::Schema)));
    }

    #[test]
    fn malformed_specs_rejected() {
        assert!(Formula::parse("a~b~c").is_err());
        assert!(Formula::parse("a++b").is_err());
        assert!(Formula::parse("").is_err());
    }
}
