//! Bounded string distance and trivial-change detection.
//!
//! Levenshtein distance is quadratic, so both distance functions refuse to
//! run on inputs longer than [`MAX_LENGTH`] characters and return a
//! [`EditDistance::Guarded`] placeholder instead. A guarded value is *not* a
//! real distance and callers must not treat it as one.
//!
//! | Function | Below guard | Above guard |
//! |----------|-------------|-------------|
//! | [`distance`] | `Exact(d)` | `Guarded(max(len a, len b))` |
//! | [`bounded_distance`] | `Exact(d)` if `d <= threshold`, else `Exceeded` | `Guarded(threshold)` |

use once_cell::sync::Lazy;
use regex::Regex;
use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::BTreeMap;
use std::io::{BufRead, Read};

/// Inputs longer than this (in characters) are not compared
pub const MAX_LENGTH: usize = 1100;

/// Lines a trivial change may touch: comments, javadoc bodies and imports
static TRIVIAL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(//|\*|import )").expect("trivial line pattern is valid")
});

/// Result of an edit-distance query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditDistance {
    /// True Levenshtein distance
    Exact(usize),
    /// True distance is larger than the requested threshold
    Exceeded,
    /// An input exceeded [`MAX_LENGTH`]; the value is a placeholder
    Guarded(usize),
}

impl EditDistance {
    /// Legacy numeric form: `-1` for [`EditDistance::Exceeded`], otherwise the
    /// carried value (which for `Guarded` is not a real distance).
    #[must_use]
    pub fn value(self) -> isize {
        match self {
            Self::Exact(d) | Self::Guarded(d) => isize::try_from(d).unwrap_or(isize::MAX),
            Self::Exceeded => -1,
        }
    }

    #[must_use]
    pub fn exact(self) -> Option<usize> {
        match self {
            Self::Exact(d) => Some(d),
            _ => None,
        }
    }
}

/// Unbounded Levenshtein distance between `a` and `b`
#[must_use]
pub fn distance(a: &str, b: &str) -> EditDistance {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() > MAX_LENGTH || b.len() > MAX_LENGTH {
        return EditDistance::Guarded(a.len().max(b.len()));
    }
    EditDistance::Exact(levenshtein(&a, &b, None).unwrap_or(usize::MAX))
}

/// Levenshtein distance between `a` and `b`, giving up once it exceeds
/// `threshold`
#[must_use]
pub fn bounded_distance(a: &str, b: &str, threshold: usize) -> EditDistance {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() > MAX_LENGTH || b.len() > MAX_LENGTH {
        return EditDistance::Guarded(threshold);
    }
    match levenshtein(&a, &b, Some(threshold)) {
        Some(d) if d <= threshold => EditDistance::Exact(d),
        _ => EditDistance::Exceeded,
    }
}

/// Distance divided by the longer length, in `[0, 1]`.
///
/// Guarded inputs count as maximally different.
#[must_use]
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    match distance(a, b) {
        EditDistance::Exact(d) => count_to_f64(d) / count_to_f64(longest),
        EditDistance::Exceeded | EditDistance::Guarded(_) => 1.0,
    }
}

/// Two-row dynamic programming. Returns `None` when `threshold` is set and
/// every cell of a row already exceeds it.
fn levenshtein(a: &[char], b: &[char], threshold: Option<usize>) -> Option<usize> {
    if a.is_empty() {
        return Some(b.len());
    }
    if b.is_empty() {
        return Some(a.len());
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            row_min = row_min.min(curr[j + 1]);
        }
        if threshold.is_some_and(|t| row_min > t) {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Some(prev[b.len()])
}

/// True if every character of `s` is an ASCII digit (vacuously true for "")
#[must_use]
pub fn is_numeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// True if two file texts differ only in comment, import or blank lines.
///
/// Only the first line on each side of every diff hunk is inspected; later
/// lines of a multi-line hunk are not checked.
#[must_use]
pub fn is_trivial_text_change(before: &str, after: &str) -> bool {
    let old: Vec<&str> = before.lines().collect();
    let new: Vec<&str> = after.lines().collect();
    trivial_lines(&old, &new, before.chars().count() == after.chars().count())
}

/// Reader form of [`is_trivial_text_change`]. Read failures are returned to
/// the caller unchanged.
pub fn is_trivial_change_in<R1: BufRead, R2: BufRead>(
    mut before: R1,
    mut after: R2,
) -> std::io::Result<bool> {
    let mut old = String::new();
    before.read_to_string(&mut old)?;
    let mut new = String::new();
    after.read_to_string(&mut new)?;
    Ok(is_trivial_text_change(&old, &new))
}

fn trivial_lines(old: &[&str], new: &[&str], same_length: bool) -> bool {
    if !same_length && old.len() != new.len() {
        return false;
    }

    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        let (source, target) = match op {
            DiffOp::Equal { .. } => continue,
            DiffOp::Delete { old_index, .. } => (old.get(old_index), None),
            DiffOp::Insert { new_index, .. } => (None, new.get(new_index)),
            DiffOp::Replace {
                old_index,
                new_index,
                ..
            } => (old.get(old_index), new.get(new_index)),
        };
        let substantive = |line: Option<&&str>| {
            line.is_some_and(|l| !l.trim().is_empty() && !TRIVIAL_LINE.is_match(l))
        };
        if substantive(source) || substantive(target) {
            return false;
        }
    }

    true
}

/// Drop file pairs whose contents are identical or differ trivially.
///
/// Both maps are keyed by file path. Returns the removed paths in order.
pub fn filter_trivial_changes(
    before: &mut BTreeMap<String, String>,
    after: &mut BTreeMap<String, String>,
) -> Vec<String> {
    let trivial: Vec<String> = before
        .iter()
        .filter(|(path, text)| {
            after
                .get(*path)
                .is_some_and(|other| *text == other || is_trivial_text_change(text, other))
        })
        .map(|(path, _)| path.clone())
        .collect();

    for path in &trivial {
        before.remove(path);
        after.remove(path);
    }

    tracing::debug!(filtered = trivial.len(), "Dropped unchanged file pairs");
    trivial
}

/// Convert a count to f64 for ratio calculations
#[inline]
#[allow(clippy::cast_precision_loss)]
fn count_to_f64(count: usize) -> f64 {
    count as f64
}
