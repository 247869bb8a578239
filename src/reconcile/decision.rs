/*!
 * Human decisions for divergent English lines.
 *
 * When the outdated file and the template disagree on an English line, the
 * validator can ask a [`DecisionProvider`] how to continue. The
 * [`HeadlessDecider`] always aborts and is used for automated runs; the
 * [`ConsoleDecider`] asks a person on a terminal.
 */

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use log::debug;

use crate::errors::DecisionError;
use super::prefix::strip_line_break;

/// Separator printed after each resolved divergence
const SEPARATOR: &str = "--------------";

/// How a divergent English line should be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the template's English line and the existing translation line
    KeepFallbackTranslation,
    /// Keep the template's English line and enter a new translation line
    KeepFallbackWithCustomText,
    /// Record the divergence as a diagnostic
    Abort,
}

impl Decision {
    /// Parse the number a user typed at the prompt
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::KeepFallbackTranslation),
            "2" => Some(Self::KeepFallbackWithCustomText),
            "3" => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Everything a decision maker gets to see about one divergence
#[derive(Debug, Clone)]
pub struct DivergenceContext<'a> {
    /// 1-based line number of the English line
    pub line_no: usize,
    /// Display name of the outdated file
    pub outdated_name: &'a str,
    /// Display name of the template file
    pub template_name: &'a str,
    /// English line as found in the outdated file
    pub outdated_line: &'a str,
    /// English line as found in the template
    pub template_line: &'a str,
    /// Existing translation line from the outdated file
    pub translation_line: &'a str,
}

/// Source of resolutions for divergent lines
pub trait DecisionProvider {
    /// Choose how to resolve a divergence
    fn prompt_choice(&mut self, context: &DivergenceContext<'_>) -> Result<Decision, DecisionError>;

    /// Supply a replacement translation line after [`Decision::KeepFallbackWithCustomText`]
    fn prompt_custom_text(&mut self, context: &DivergenceContext<'_>) -> Result<String, DecisionError>;

    /// Called once a divergence has been resolved by keeping the template line
    fn resolved(&mut self, _context: &DivergenceContext<'_>) -> Result<(), DecisionError> {
        Ok(())
    }
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for &mut D {
    fn prompt_choice(&mut self, context: &DivergenceContext<'_>) -> Result<Decision, DecisionError> {
        (**self).prompt_choice(context)
    }

    fn prompt_custom_text(&mut self, context: &DivergenceContext<'_>) -> Result<String, DecisionError> {
        (**self).prompt_custom_text(context)
    }

    fn resolved(&mut self, context: &DivergenceContext<'_>) -> Result<(), DecisionError> {
        (**self).resolved(context)
    }
}

/// Decision provider for unattended runs: every divergence is aborted
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessDecider;

impl DecisionProvider for HeadlessDecider {
    fn prompt_choice(&mut self, context: &DivergenceContext<'_>) -> Result<Decision, DecisionError> {
        debug!("Headless run, aborting divergence at line {}", context.line_no);
        Ok(Decision::Abort)
    }

    fn prompt_custom_text(&mut self, context: &DivergenceContext<'_>) -> Result<String, DecisionError> {
        Err(DecisionError::Unavailable(context.line_no))
    }
}

/// Interactive decision provider reading answers from `input` and writing prompts to `output`
pub struct ConsoleDecider<R, W> {
    input: R,
    output: W,
}

impl ConsoleDecider<StdinLock<'static>, Stdout> {
    /// Decider bound to the process' stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleDecider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink, mostly useful to inspect what was printed
    pub fn into_output(self) -> W {
        self.output
    }

    // @returns: None on end of input
    fn read_line(&mut self) -> Result<Option<String>, DecisionError> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_break(&buffer).to_string()))
    }
}

impl<R: BufRead, W: Write> DecisionProvider for ConsoleDecider<R, W> {
    fn prompt_choice(&mut self, context: &DivergenceContext<'_>) -> Result<Decision, DecisionError> {
        writeln!(
            self.output,
            "Line {} differs:\n{} ({})\n{} ({})\n",
            context.line_no, context.outdated_line, context.outdated_name,
            context.template_line, context.template_name
        )?;
        writeln!(
            self.output,
            "The translation is:\n{} ({})\n",
            context.translation_line, context.outdated_name
        )?;

        loop {
            writeln!(
                self.output,
                "Enter number:\n\
                 (1) Keep english line from {template} line and translation from {outdated}\n\
                 (2) Keep english line {template} and enter new custom line\n\
                 (3) Abort",
                template = context.template_name,
                outdated = context.outdated_name
            )?;
            self.output.flush()?;

            let Some(answer) = self.read_line()? else {
                debug!("Input closed while waiting for a choice, aborting");
                return Ok(Decision::Abort);
            };
            if let Some(decision) = Decision::from_choice(&answer) {
                return Ok(decision);
            }
        }
    }

    fn prompt_custom_text(&mut self, context: &DivergenceContext<'_>) -> Result<String, DecisionError> {
        writeln!(self.output, "\nNew translation:")?;
        self.output.flush()?;
        self.read_line()?
            .ok_or(DecisionError::InputClosed(context.line_no))
    }

    fn resolved(&mut self, _context: &DivergenceContext<'_>) -> Result<(), DecisionError> {
        writeln!(self.output, "{}\n", SEPARATOR)?;
        Ok(())
    }
}
