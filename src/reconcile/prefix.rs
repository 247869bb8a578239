/*!
 * Prefix markers and line roles.
 *
 * Translation files alternate between an English line and its translation.
 * An English line may start with a prefix marker such as `&31 `, which also
 * applies to the translation line right after it. Both the validator and the
 * merger walk the files with the same [`PrefixTracker`], so they can never
 * disagree about which prefix is in effect.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for a prefix marker at the very start of a line: `&`, digits, one space
static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&\d* ").expect("Invalid prefix regex")
});

/// Marker that opens a comment section in a translation line
pub const COMMENT_MARKER: &str = "//";

/// Extract the prefix marker from the start of a line.
///
/// Returns `None` when the line carries no prefix.
pub fn extract_prefix(line: &str) -> Option<&str> {
    PREFIX_REGEX.find(line).map(|m| m.as_str())
}

/// Remove one trailing line break (`\r\n`, `\r` or `\n`), leaving interior content alone
pub fn strip_line_break(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Whether the 1-based line position holds an English line (odd) or a translation (even)
pub fn is_english_role(position: usize) -> bool {
    position % 2 == 1
}

/// Whether a line belongs to a comment section
pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Bring a translation line in line with the prefix currently in effect.
///
/// A line that already has a prefix is returned unchanged, provided the prefix
/// matches `current_prefix`. A line without one gets `current_prefix` prepended
/// (which may be empty). Returns `None` if the line carries a different prefix.
pub fn adjust_with_prefix(line: &str, current_prefix: &str) -> Option<String> {
    match extract_prefix(line) {
        Some(found) if found != current_prefix => None,
        Some(_) => Some(line.to_string()),
        None => Some(format!("{}{}", current_prefix, line)),
    }
}

/// Role of a line inside a translation file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// English (baseline) text, odd 1-based positions
    English,
    /// Translation of the preceding English line, even 1-based positions
    Translation,
}

impl LineRole {
    /// Role for a 0-based index into a line sequence
    pub fn at(index: usize) -> Self {
        if is_english_role(index + 1) {
            Self::English
        } else {
            Self::Translation
        }
    }
}

/// Carries the prefix of the most recent English line forward to its translation
#[derive(Debug, Clone, Default)]
pub struct PrefixTracker {
    current: String,
}

impl PrefixTracker {
    /// Create a tracker with no prefix in effect
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the prefix from an English line and return it
    pub fn enter_english(&mut self, line: &str) -> &str {
        self.current.clear();
        if let Some(prefix) = extract_prefix(line) {
            self.current.push_str(prefix);
        }
        &self.current
    }

    /// The prefix in effect, empty if the last English line had none
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Whether a translation line's own prefix (if any) agrees with the one in effect
    pub fn accepts(&self, translation_line: &str) -> bool {
        extract_prefix(translation_line).is_none_or(|found| found == self.current)
    }
}
