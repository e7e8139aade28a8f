//! Applying [`Edit`]s to module source text.
//!
//! Edits from one check pass may overlap (a statement deletion and a whole
//! module rewrite both touch the same bytes). A pass applies the earliest
//! non-overlapping subset and reports the rest as deferred; callers re-check
//! the result and run another pass to pick them up.

use thiserror::Error;

use crate::types::Edit;

/// Errors raised while applying edits.
#[derive(Debug, Error)]
pub enum FixError {
    /// An edit range does not fit the source text.
    #[error("edit range {start}..{end} is invalid for a source of {len} bytes")]
    InvalidRange {
        /// Start of the offending range.
        start: usize,
        /// End of the offending range.
        end: usize,
        /// Source length.
        len: usize,
    },
}

/// Result of applying one pass of edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The edited source text.
    pub text: String,
    /// Number of edits applied.
    pub applied: usize,
    /// Number of edits deferred because they overlapped an applied edit.
    pub deferred: usize,
}

/// Applies the non-overlapping subset of `edits` to `source`.
///
/// Edits are considered in order of their start offset (ties keep input
/// order); an edit overlapping one already selected is deferred.
///
/// # Errors
///
/// Returns an error if an edit range is out of bounds, inverted, or does not
/// fall on a character boundary.
pub fn apply_edits(source: &str, edits: &[&Edit]) -> Result<FixOutcome, FixError> {
    let len = source.len();
    let mut ordered: Vec<(std::ops::Range<usize>, &Edit)> = Vec::with_capacity(edits.len());
    for &edit in edits {
        let range = edit.range(len);
        if range.start > range.end
            || range.end > len
            || !source.is_char_boundary(range.start)
            || !source.is_char_boundary(range.end)
        {
            return Err(FixError::InvalidRange {
                start: range.start,
                end: range.end,
                len,
            });
        }
        ordered.push((range, edit));
    }
    ordered.sort_by_key(|(range, _)| range.start);

    let mut selected: Vec<(std::ops::Range<usize>, &Edit)> = Vec::new();
    let mut deferred = 0;
    for (range, edit) in ordered {
        let overlaps = selected
            .last()
            .is_some_and(|(last, _)| range.start < last.end || range.start == last.start);
        if overlaps {
            deferred += 1;
        } else {
            selected.push((range, edit));
        }
    }

    let mut text = source.to_string();
    for (range, edit) in selected.iter().rev() {
        text.replace_range(range.clone(), edit.replacement());
    }

    Ok(FixOutcome {
        text,
        applied: selected.len(),
        deferred,
    })
}
