//! Zero-context unified diff rendering.
//!
//! Output is a list of text lines:
//!
//! ```text
//! --- v1
//! +++ v2
//! @@ -2,1 +2,1 @@
//! -b
//! +x
//! ```
//!
//! Identical inputs produce no lines at all, not even the headers.

use std::ops::Range;

use similar::{Algorithm, DiffOp, DiffTag, capture_diff_slices};

/// Splits content into lines on `\n`.
///
/// An empty string is a single empty line. Trailing empty lines are
/// otherwise dropped, so `"a\n"` and `"a"` split the same way and `"\n"`
/// has no lines.
pub fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        return vec![""];
    }
    let mut lines: Vec<&str> = content.split('\n').collect();
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// A run of adjacent changed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hunk {
    old: Range<usize>,
    new: Range<usize>,
}

impl Hunk {
    fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old.start + 1,
            self.old.len(),
            self.new.start + 1,
            self.new.len()
        )
    }
}

/// Groups the non-equal ops of an edit script into hunks with no context.
fn hunks(ops: &[DiffOp]) -> Vec<Hunk> {
    let mut out: Vec<Hunk> = Vec::new();
    let mut open = false;

    for op in ops {
        let (tag, old, new) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            open = false;
            continue;
        }
        match out.last_mut() {
            Some(hunk) if open => {
                hunk.old.end = old.end;
                hunk.new.end = new.end;
            }
            _ => out.push(Hunk { old, new }),
        }
        open = true;
    }

    out
}

/// Renders the unified diff from `old` to `new`, labeling the sides
/// `from_label` and `to_label`.
pub fn unified_diff(from_label: &str, to_label: &str, old: &str, new: &str) -> Vec<String> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let ops = capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines);
    let hunks = hunks(&ops);
    if hunks.is_empty() {
        return Vec::new();
    }

    let mut out = vec![format!("--- {from_label}"), format!("+++ {to_label}")];
    for hunk in &hunks {
        out.push(hunk.header());
        out.extend(old_lines[hunk.old.clone()].iter().map(|l| format!("-{l}")));
        out.extend(new_lines[hunk.new.clone()].iter().map(|l| format!("+{l}")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty_is_one_line() {
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_split_drops_trailing_empties() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb\n\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(split_lines("\n").is_empty());
    }

    #[test]
    fn test_single_line_change() {
        let diff = unified_diff("v1", "v2", "a\nb\nc", "a\nx\nc");
        assert_eq!(diff, vec!["--- v1", "+++ v2", "@@ -2,1 +2,1 @@", "-b", "+x"]);
    }

    #[test]
    fn test_identical_is_empty() {
        assert!(unified_diff("v1", "v1", "a\nb", "a\nb").is_empty());
        assert!(unified_diff("v1", "v1", "", "").is_empty());
    }

    #[test]
    fn test_trailing_newline_is_not_a_change() {
        assert!(unified_diff("v1", "v2", "a\nb", "a\nb\n").is_empty());
    }

    #[test]
    fn test_swapped_arguments_swap_roles() {
        let forward = unified_diff("v1", "v2", "a\nb\nc", "a\nx\nc");
        let backward = unified_diff("v2", "v1", "a\nx\nc", "a\nb\nc");
        assert_eq!(backward, vec!["--- v2", "+++ v1", "@@ -2,1 +2,1 @@", "-x", "+b"]);

        let removed = |d: &[String]| -> Vec<String> {
            d.iter()
                .filter(|l| l.starts_with('-') && !l.starts_with("---"))
                .map(|l| l[1..].to_string())
                .collect()
        };
        let added = |d: &[String]| -> Vec<String> {
            d.iter()
                .filter(|l| l.starts_with('+') && !l.starts_with("+++"))
                .map(|l| l[1..].to_string())
                .collect()
        };
        assert_eq!(removed(&forward), added(&backward));
        assert_eq!(added(&forward), removed(&backward));
    }

    #[test]
    fn test_pure_insertion() {
        let diff = unified_diff("v1", "v2", "a\nc", "a\nb\nc");
        assert_eq!(diff, vec!["--- v1", "+++ v2", "@@ -2,0 +2,1 @@", "+b"]);
    }

    #[test]
    fn test_pure_deletion() {
        let diff = unified_diff("v1", "v2", "a\nb\nc", "a\nc");
        assert_eq!(diff, vec!["--- v1", "+++ v2", "@@ -2,1 +2,0 @@", "-b"]);
    }

    #[test]
    fn test_separate_hunks() {
        let diff = unified_diff("v1", "v2", "a\nb\nc\nd\ne", "A\nb\nc\nd\nE");
        assert_eq!(
            diff,
            vec![
                "--- v1",
                "+++ v2",
                "@@ -1,1 +1,1 @@",
                "-a",
                "+A",
                "@@ -5,1 +5,1 @@",
                "-e",
                "+E",
            ]
        );
    }

    #[test]
    fn test_from_empty_content() {
        let diff = unified_diff("v1", "v2", "", "a");
        assert_eq!(diff, vec!["--- v1", "+++ v2", "@@ -1,1 +1,1 @@", "-", "+a"]);
    }

    #[test]
    fn test_deterministic() {
        let old = "one\ntwo\nthree\nfour";
        let new = "zero\ntwo\nfour\nfive";
        assert_eq!(unified_diff("v3", "v7", old, new), unified_diff("v3", "v7", old, new));
    }
}
