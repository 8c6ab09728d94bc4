//! Tab tokenization of one line into a column offset table.
//!
//! The offset table has `ncols + 1` entries: field `i` occupies
//! `line[offsets[i] .. offsets[i + 1] - 1]`, i.e. each entry points one
//! past the previous delimiter and the final entry is one past the last
//! field (with any trailing newline already excluded). This keeps field
//! extraction branch-free and lets an empty field be detected as
//! `offsets[i] + 1 == offsets[i + 1]`.

use memchr::memchr_iter;

/// Count the columns of a line: tabs + 1. The line may still carry its
/// trailing newline.
pub fn count_columns(line: &[u8]) -> usize {
    memchr_iter(b'\t', line).count() + 1
}

/// Tokenize `line` into `offsets`, which is resized to `ncols + 1`
/// entries. Returns the number of fields actually found, which is less
/// than `ncols` for a short row. Columns beyond `ncols` are left glued to
/// the last field, as the probed schema width is authoritative.
pub fn tokenize_into(offsets: &mut Vec<usize>, ncols: usize, line: &[u8]) -> usize {
    offsets.clear();
    offsets.resize(ncols + 1, 0);

    let mut len = line.len();
    if len > 0 && line[len - 1] == b'\n' {
        len -= 1;
    }

    let mut nf = 1;
    for tab in memchr_iter(b'\t', line) {
        if nf == ncols {
            break;
        }
        offsets[nf] = tab + 1;
        nf += 1;
    }
    offsets[nf] = len + 1;
    nf
}

/// Borrow field `i` out of a tokenized line.
pub fn field<'a>(line: &'a [u8], offsets: &[usize], i: usize) -> &'a [u8] {
    &line[offsets[i]..offsets[i + 1] - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_columns_with_and_without_newline() {
        assert_eq!(count_columns(b"a\tb\tc\n"), 3);
        assert_eq!(count_columns(b"a\tb\tc"), 3);
        assert_eq!(count_columns(b"solo\n"), 1);
        assert_eq!(count_columns(b"\t\n"), 2);
    }

    #[test]
    fn offsets_delimit_fields() {
        let mut offs = Vec::new();
        let line = b"foo\tba\tquux\n";
        let nf = tokenize_into(&mut offs, 3, line);
        assert_eq!(nf, 3);
        assert_eq!(field(line, &offs, 0), b"foo");
        assert_eq!(field(line, &offs, 1), b"ba");
        assert_eq!(field(line, &offs, 2), b"quux");
    }

    #[test]
    fn short_row_reports_fewer_fields() {
        let mut offs = Vec::new();
        let nf = tokenize_into(&mut offs, 4, b"a\tb\n");
        assert_eq!(nf, 2);
    }

    #[test]
    fn empty_fields_have_adjacent_offsets() {
        let mut offs = Vec::new();
        let line = b"x\t\ty\n";
        tokenize_into(&mut offs, 3, line);
        assert_eq!(field(line, &offs, 1), b"");
        assert_eq!(offs[1] + 1, offs[2]);
    }

    #[test]
    fn excess_columns_stay_in_last_field() {
        let mut offs = Vec::new();
        let line = b"a\tb\tc\n";
        let nf = tokenize_into(&mut offs, 2, line);
        assert_eq!(nf, 2);
        assert_eq!(field(line, &offs, 1), b"b\tc");
    }
}
