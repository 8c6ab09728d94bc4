//! End-to-end merge operator tests over in-memory streams.

use std::io::Cursor;

use tabrec_engine::{merge, EngineError, MergeOptions, ReadOptions};

fn run_merge(
    left: &str,
    right: &str,
    spec: &str,
    opts: &MergeOptions,
) -> (String, Result<(), EngineError>) {
    let mut out = Vec::new();
    let r = merge(
        Cursor::new(left.as_bytes().to_vec()),
        Cursor::new(right.as_bytes().to_vec()),
        spec,
        opts,
        &mut out,
    );
    (String::from_utf8(out).expect("output is utf8"), r)
}

fn outer_both() -> MergeOptions {
    MergeOptions {
        keep_left: true,
        keep_right: true,
        ..Default::default()
    }
}

#[test]
fn inner_join_emits_only_matching_keys() {
    let (out, r) = run_merge(
        "1\tx\n2\ty\n",
        "1\tx\n2\tz\n3\tw\n",
        "1",
        &MergeOptions::default(),
    );
    r.unwrap();
    assert_eq!(out, "1\tx\tx\n2\ty\tz\n");
}

#[test]
fn full_outer_join_pads_both_sides() {
    let (out, r) = run_merge("1\tx\n2\ty\n", "1\tx\n2\tz\n3\tw\n", "1", &outer_both());
    r.unwrap();
    assert_eq!(out, "1\tx\tx\n2\ty\tz\n3\t\tw\n");
}

#[test]
fn outer_row_counts_follow_set_arithmetic() {
    // |A| = 4, |B| = 4, matches = 2
    let a = "a\t1\nb\t2\nc\t3\nd\t4\n";
    let b = "b\t9\nd\t8\ne\t7\nf\t6\n";
    let (inner, r) = run_merge(a, b, "1", &MergeOptions::default());
    r.unwrap();
    assert_eq!(inner.lines().count(), 2);
    let (full, r) = run_merge(a, b, "1", &outer_both());
    r.unwrap();
    assert_eq!(full.lines().count(), 4 + 4 - 2);
}

#[test]
fn left_outer_only_keeps_left_unmatched() {
    let opts = MergeOptions {
        keep_left: true,
        ..Default::default()
    };
    let (out, r) = run_merge("1\tx\n2\ty\n", "2\tz\n3\tw\n", "1", &opts);
    r.unwrap();
    assert_eq!(out, "1\tx\t\n2\ty\tz\n");
}

#[test]
fn right_outer_only_keeps_right_unmatched() {
    let opts = MergeOptions {
        keep_right: true,
        ..Default::default()
    };
    let (out, r) = run_merge("1\tx\n2\ty\n", "2\tz\n3\tw\n", "1", &opts);
    r.unwrap();
    assert_eq!(out, "2\ty\tz\n3\t\tw\n");
}

#[test]
fn multi_column_keys_compare_as_tab_joined_bytes() {
    let (out, r) = run_merge(
        "a\t1\tL1\na\t2\tL2\nb\t1\tL3\n",
        "a\t2\tR1\nb\t1\tR2\nb\t2\tR3\n",
        "1+2",
        &outer_both(),
    );
    r.unwrap();
    assert_eq!(
        out,
        "a\t1\tL1\t\na\t2\tL2\tR1\nb\t1\tL3\tR2\nb\t2\t\tR3\n"
    );
}

#[test]
fn headers_resolve_names_and_col_names_prints_unified_header() {
    let opts = MergeOptions {
        read: ReadOptions {
            header: true,
            ..Default::default()
        },
        col_names: true,
        keep_left: true,
        keep_right: true,
    };
    let (out, r) = run_merge(
        "id\tprice\n1\t10\n2\t20\n",
        "id\tqty\n2\t5\n3\t6\n",
        "id",
        &opts,
    );
    r.unwrap();
    assert_eq!(out, "id\tprice\tqty\n1\t10\t\n2\t20\t5\n3\t\t6\n");
}

#[test]
fn renamed_join_columns_match_across_sides() {
    let opts = MergeOptions {
        read: ReadOptions {
            header: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let (out, r) = run_merge(
        "id\tv\n7\ta\n",
        "key\tw\n7\tb\n",
        "id=key",
        &opts,
    );
    r.unwrap();
    assert_eq!(out, "7\ta\tb\n");
}

#[test]
fn multiple_value_columns_emit_side_by_side_blocks() {
    let (out, r) = run_merge(
        "k\tl1\tl2\n",
        "k\tr1\tr2\tr3\n",
        "1",
        &MergeOptions::default(),
    );
    r.unwrap();
    assert_eq!(out, "k\tl1\tl2\tr1\tr2\tr3\n");
}

#[test]
fn name_tokens_without_headers_fail_at_startup() {
    let (out, r) = run_merge("1\tx\n", "1\ty\n", "id", &MergeOptions::default());
    let err = r.unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(out.is_empty());
}

#[test]
fn malformed_formula_fails_at_startup() {
    let (_, r) = run_merge("1\tx\n", "1\ty\n", "1++2", &MergeOptions::default());
    assert_eq!(r.unwrap_err().exit_code(), 1);
}

#[test]
fn out_of_range_column_fails_at_startup() {
    let (_, r) = run_merge("1\tx\n", "1\ty\n", "5", &MergeOptions::default());
    assert_eq!(r.unwrap_err().exit_code(), 1);
}

#[test]
fn short_row_stops_stream_but_keeps_flushed_output() {
    let (out, r) = run_merge(
        "1\tx\n2\ty\nbroken\n3\tz\n",
        "1\ta\n2\tb\n3\tc\n",
        "1",
        &outer_both(),
    );
    let err = r.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    // left stops at the bad line; the right side still drains
    assert_eq!(out, "1\tx\ta\n2\ty\tb\n3\t\tc\n");
}

#[test]
fn empty_input_is_a_startup_error() {
    let (_, r) = run_merge("", "1\ty\n", "1", &MergeOptions::default());
    assert_eq!(r.unwrap_err().exit_code(), 1);
}

#[test]
fn every_row_is_visited_exactly_once() {
    let mut left = String::new();
    let mut right = String::new();
    for i in 0..100 {
        left.push_str(&format!("{:03}\tL{}\n", i, i));
        if i % 3 == 0 {
            right.push_str(&format!("{:03}\tR{}\n", i, i));
        }
    }
    let (out, r) = run_merge(&left, &right, "1", &outer_both());
    r.unwrap();
    // 100 left rows, 34 right rows, 34 matches
    assert_eq!(out.lines().count(), 100);
    let padded = out.lines().filter(|l| l.ends_with('\t')).count();
    assert_eq!(padded, 100 - 34);
}
