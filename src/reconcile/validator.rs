/*!
 * Validation of an outdated translation file against a newer template.
 *
 * Walks both files pair by pair and classifies every English line as
 * compatible, a comment section, or a divergence. Divergences can be resolved
 * by a [`DecisionProvider`] while no diagnostic has been recorded yet. Once the
 * first unresolved problem shows up, the validated output stops growing, but
 * the scan goes on so that every problem of the file is reported at once.
 *
 * A decision provider that fails counts as an abort at that line, so the
 * lines validated before it are never lost.
 */

use std::fmt;

use log::{debug, info, warn};

use crate::errors::ValidationError;
use super::decision::{Decision, DecisionProvider, DivergenceContext, HeadlessDecider};
use super::prefix::{extract_prefix, is_comment, strip_line_break, LineRole, PrefixTracker};

/// A line sequence together with the name it is reported under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedLines {
    /// Display name, usually the file name
    pub name: String,
    /// Raw lines, line breaks may or may not be present
    pub lines: Vec<String>,
}

impl NamedLines {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Category of a validation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The files have different line counts
    LengthMismatch,
    /// The files have an odd line count, so the last English line has no translation
    OddLength,
    /// An English line changed beyond its prefix
    ContentDivergence,
    /// A translation line is a comment in the outdated file but not in the template
    CommentSectionMismatch,
    /// A translation line's prefix differs from the one of its English line
    PrefixMismatch,
}

impl DiagnosticKind {
    /// Whether the problem concerns the shape of the files rather than a single line
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::LengthMismatch | Self::OddLength)
    }
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Problem category
    pub kind: DiagnosticKind,
    /// 1-based line number, `None` for whole-file problems
    pub line: Option<usize>,
    /// Human readable description
    pub message: String,
}

impl Diagnostic {
    fn length_mismatch(outdated: &NamedLines, template: &NamedLines) -> Self {
        Self {
            kind: DiagnosticKind::LengthMismatch,
            line: None,
            message: format!(
                "The given files have a different lines count: {} ({}) vs {} ({}).",
                outdated.lines.len(), outdated.name, template.lines.len(), template.name
            ),
        }
    }

    fn odd_length(outdated: &NamedLines) -> Self {
        Self {
            kind: DiagnosticKind::OddLength,
            line: None,
            message: format!(
                "The given files have an odd lines count: {} ({}). Every English line needs a translation line.",
                outdated.lines.len(), outdated.name
            ),
        }
    }

    fn content_divergence(line_no: usize, old_line: &str, template_line: &str, names: (&str, &str)) -> Self {
        Self {
            kind: DiagnosticKind::ContentDivergence,
            line: Some(line_no),
            message: format!(
                "Line {} differs: \"{}\" ({} with interpolated prefix) vs \"{}\" ({}).",
                line_no, old_line, names.0, template_line, names.1
            ),
        }
    }

    fn comment_section_mismatch(line_no: usize, names: (&str, &str)) -> Self {
        Self {
            kind: DiagnosticKind::CommentSectionMismatch,
            line: Some(line_no),
            message: format!(
                "Line {} is a comment in {}, but not in {}.",
                line_no, names.0, names.1
            ),
        }
    }

    fn prefix_mismatch(line_no: usize, found: &str, current: &str, names: (&str, &str)) -> Self {
        Self {
            kind: DiagnosticKind::PrefixMismatch,
            line: Some(line_no),
            message: format!(
                "Line {} has different prefixes: \"{}\" ({}) vs \"{}\" ({}).",
                line_no, found, names.0, current, names.1
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Lines confirmed compatible or resolved, up to the first unresolved problem
    pub validated: Vec<String>,
    /// Every problem found, in file order
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    fn rejected(diagnostic: Diagnostic) -> Self {
        Self {
            validated: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }

    /// Whether the files can be merged
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether the files could not be paired at all, so nothing was validated
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.first().is_some_and(|d| d.kind.is_fatal())
    }

    /// Report of all diagnostics, `None` on success
    pub fn report(&self) -> Option<String> {
        let first = self.diagnostics.first()?;
        if first.kind.is_fatal() {
            return Some(first.message.clone());
        }
        let messages: Vec<&str> = self.diagnostics.iter().map(|d| d.message.as_str()).collect();
        Some(format!("Some lines don't match: {}", messages.join("\n")))
    }

    /// Turn a failed result into an error, keeping the validated lines out of it
    pub fn to_error(&self) -> Option<ValidationError> {
        self.report().map(|report| ValidationError::Rejected { report })
    }
}

/// Collects validated lines until the first problem, and every problem after that
#[derive(Debug, Default)]
struct Accumulator {
    validated: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    frozen: bool,
}

impl Accumulator {
    fn accept(&mut self, line: &str) {
        if !self.frozen {
            self.validated.push(line.to_string());
        }
    }

    fn reject(&mut self, diagnostic: Diagnostic) {
        debug!("{}", diagnostic);
        self.frozen = true;
        self.diagnostics.push(diagnostic);
    }

    fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            validated: self.validated,
            diagnostics: self.diagnostics,
        }
    }
}

/// Validator for an outdated translation file and a template
pub struct Validator<D> {
    decider: D,
    interactive: bool,
}

impl Validator<HeadlessDecider> {
    /// Validator that never asks anyone: every divergence becomes a diagnostic
    pub fn headless() -> Self {
        Self::new(HeadlessDecider, false)
    }
}

impl<D: DecisionProvider> Validator<D> {
    /// Create a validator; `decider` is only consulted when `interactive` is set
    pub fn new(decider: D, interactive: bool) -> Self {
        Self { decider, interactive }
    }

    /// Validate `outdated` against `template`.
    ///
    /// Every problem with the files, including a failing decision provider,
    /// is reported as a diagnostic in the result.
    pub fn validate(&mut self, outdated: &NamedLines, template: &NamedLines) -> ValidationResult {
        if outdated.lines.len() != template.lines.len() {
            return ValidationResult::rejected(Diagnostic::length_mismatch(outdated, template));
        }
        if outdated.lines.len() % 2 != 0 {
            return ValidationResult::rejected(Diagnostic::odd_length(outdated));
        }

        info!(
            "Validating {} lines of {} against {}",
            outdated.lines.len(), outdated.name, template.name
        );

        let names = (outdated.name.as_str(), template.name.as_str());
        let mut acc = Accumulator::default();
        let mut tracker = PrefixTracker::new();
        let mut index = 0;

        while index < outdated.lines.len() {
            let line_no = index + 1;
            let old_line = strip_line_break(&outdated.lines[index]);
            let template_line = strip_line_break(&template.lines[index]);

            match LineRole::at(index) {
                LineRole::English => {
                    let prefix = tracker.enter_english(template_line);
                    let compatible = old_line == template_line
                        || template_line.strip_prefix(prefix) == Some(old_line);

                    if compatible {
                        acc.accept(template_line);
                    } else {
                        index += self.resolve_divergence(index, outdated, template, &mut acc);
                    }
                }
                LineRole::Translation => {
                    match extract_prefix(old_line) {
                        Some(found) if !tracker.accepts(old_line) => {
                            acc.reject(Diagnostic::prefix_mismatch(line_no, found, tracker.current(), names));
                        }
                        _ => acc.accept(old_line),
                    }
                }
            }

            index += 1;
        }

        let result = acc.finish();
        debug!(
            "Validation finished: {} lines validated, {} diagnostics",
            result.validated.len(),
            result.diagnostics.len()
        );
        result
    }

    // @returns: Number of extra lines consumed (the translation line after a resolution)
    fn resolve_divergence(
        &mut self,
        index: usize,
        outdated: &NamedLines,
        template: &NamedLines,
        acc: &mut Accumulator,
    ) -> usize {
        let line_no = index + 1;
        let names = (outdated.name.as_str(), template.name.as_str());
        let old_line = strip_line_break(&outdated.lines[index]);
        let template_line = strip_line_break(&template.lines[index]);
        let translation_line = strip_line_break(&outdated.lines[index + 1]);

        // Comment sections are structural and never negotiable
        if is_comment(translation_line) {
            if is_comment(strip_line_break(&template.lines[index + 1])) {
                debug!("Line {} differs inside a comment section, keeping template", line_no);
                acc.accept(template_line);
            } else {
                acc.reject(Diagnostic::comment_section_mismatch(line_no, names));
            }
            return 0;
        }

        let divergence = Diagnostic::content_divergence(line_no, old_line, template_line, names);
        if !self.interactive || acc.is_frozen() {
            acc.reject(divergence);
            return 0;
        }

        let context = DivergenceContext {
            line_no,
            outdated_name: names.0,
            template_name: names.1,
            outdated_line: old_line,
            template_line,
            translation_line,
        };

        let decision = self.decider.prompt_choice(&context).and_then(|decision| match decision {
            Decision::KeepFallbackTranslation => Ok(Some(translation_line.to_string())),
            Decision::KeepFallbackWithCustomText => self.decider.prompt_custom_text(&context).map(Some),
            Decision::Abort => Ok(None),
        });

        let translation = match decision {
            Ok(Some(translation)) => translation,
            Ok(None) => {
                acc.reject(divergence);
                return 0;
            }
            Err(e) => {
                warn!("No decision for line {}, aborting: {}", line_no, e);
                acc.reject(divergence);
                return 0;
            }
        };

        debug!("Line {}: keeping template line with translation \"{}\"", line_no, translation);
        acc.accept(template_line);
        acc.accept(strip_line_break(&translation));
        // The resolution already took effect, a failed acknowledgement does not undo it
        if let Err(e) = self.decider.resolved(&context) {
            warn!("Failed to acknowledge resolution of line {}: {}", line_no, e);
        }
        1
    }
}
