/*!
 * Merging of validated translation lines with a template.
 *
 * English lines always come from the fallback (the template). A translation
 * line from the preferred sequence wins unless it has no content beyond its
 * prefix, in which case the fallback's translation is used.
 */

use log::debug;

use crate::errors::MergeError;
use super::prefix::{adjust_with_prefix, strip_line_break, LineRole, PrefixTracker};

/// Merge `preferred` (validated human translations) with `fallback` (template).
///
/// Both sequences must have the same length and must have passed validation;
/// a translation line whose prefix contradicts its English line is reported as
/// [`MergeError::InvalidState`].
pub fn merge<P: AsRef<str>, F: AsRef<str>>(
    preferred: &[P],
    fallback: &[F],
) -> Result<Vec<String>, MergeError> {
    if preferred.len() != fallback.len() {
        return Err(MergeError::LengthMismatch {
            preferred: preferred.len(),
            fallback: fallback.len(),
        });
    }

    let mut merged = Vec::with_capacity(preferred.len());
    let mut tracker = PrefixTracker::new();

    for (index, (preferred_line, fallback_line)) in preferred.iter().zip(fallback).enumerate() {
        let preferred_line = strip_line_break(preferred_line.as_ref());
        let fallback_line = strip_line_break(fallback_line.as_ref());

        match LineRole::at(index) {
            LineRole::English => {
                tracker.enter_english(fallback_line);
                merged.push(fallback_line.to_string());
            }
            LineRole::Translation => {
                let current = tracker.current();
                let invalid = || MergeError::InvalidState { line: index + 1 };
                let adjusted_preferred = adjust_with_prefix(preferred_line, current).ok_or_else(invalid)?;
                let adjusted_fallback = adjust_with_prefix(fallback_line, current).ok_or_else(invalid)?;

                if adjusted_preferred == current {
                    merged.push(adjusted_fallback);
                } else {
                    merged.push(adjusted_preferred);
                }
            }
        }
    }

    debug!("Merged {} lines", merged.len());
    Ok(merged)
}

/// Merge a sequence with itself, which only normalizes prefixes of translation lines
pub fn merge_self<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, MergeError> {
    merge(lines, lines)
}
