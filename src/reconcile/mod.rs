/*!
 * Reconciliation of outdated translation files with newer templates.
 *
 * Translation files are line oriented: every English line is followed by its
 * translation. An outdated file holds human translations for an older English
 * baseline, the template holds the current English baseline (often with new
 * prefix markers) and usually no translations.
 *
 * # Architecture
 *
 * - `prefix`: Prefix extraction, line roles and the shared `PrefixTracker`
 * - `decision`: Decision providers for divergent lines
 * - `validator`: Classifies every line pair and collects diagnostics
 * - `merger`: Combines validated lines with the template
 */

pub mod decision;
pub mod merger;
pub mod prefix;
pub mod validator;

// Re-export main types
pub use decision::{ConsoleDecider, Decision, DecisionProvider, DivergenceContext, HeadlessDecider};
pub use merger::{merge, merge_self};
pub use prefix::{adjust_with_prefix, extract_prefix, is_english_role, strip_line_break, LineRole, PrefixTracker};
pub use validator::{Diagnostic, DiagnosticKind, NamedLines, ValidationResult, Validator};
