use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, TextEncoding};
use crate::errors::{AppError, ValidationError};
use crate::file_utils::FileManager;
use crate::reconcile::{merge, merge_self, DecisionProvider, NamedLines, Validator};

// @module: Application controller for translation file reconciliation

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// File the merged lines were written to
    pub output_path: PathBuf,
    /// Number of lines written
    pub lines_written: usize,
}

/// Main application controller for validating and merging translation files
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// The configuration the controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.config.output_file)
    }

    /// Run the main workflow on files: load, validate if a template is given, merge and persist
    pub fn run<D: DecisionProvider>(
        &self,
        translation_file: &Path,
        template_file: Option<&Path>,
        decider: D,
    ) -> Result<Outcome> {
        let (translation_lines, encoding) = FileManager::read_lines(translation_file, self.config.encoding)
            .with_context(|| format!("Failed to read translation file: {:?}", translation_file))?;
        let translation = NamedLines::new(display_name(translation_file), translation_lines);

        match template_file {
            Some(template_file) => {
                // The output is written in the encoding of the translation file
                let (template_lines, _) = FileManager::read_lines(template_file, self.config.encoding)
                    .with_context(|| format!("Failed to read template file: {:?}", template_file))?;
                let template = NamedLines::new(display_name(template_file), template_lines);
                self.process_with_template(&translation, &template, encoding, decider)
            }
            None => self.process_without_template(&translation, encoding),
        }
    }

    /// Validate `translation` against `template` and write the merged result.
    ///
    /// On validation failure the lines validated so far are written to the
    /// output file instead and a [`ValidationError::Rejected`] is returned. If
    /// the files cannot be paired at all, the output file is left untouched.
    pub fn process_with_template<D: DecisionProvider>(
        &self,
        translation: &NamedLines,
        template: &NamedLines,
        encoding: TextEncoding,
        decider: D,
    ) -> Result<Outcome> {
        let output_path = self.output_path();
        let result = Validator::new(decider, self.config.interactive).validate(translation, template);

        if let Some(rejection) = result.to_error() {
            error!("{}", rejection);
            error!("--------------");
            error!("Canceled operation due to an error.");
            if result.is_fatal() {
                info!("Nothing has been written to {:?}.", output_path);
            } else {
                self.store_progress(&output_path, &result.validated, encoding, translation)?;
            }
            return Err(AppError::from(rejection).into());
        }

        debug!("Validation passed, merging with {}", template.name);
        let merged = match merge(&result.validated, &template.lines) {
            Ok(merged) => merged,
            Err(e) => {
                self.store_progress(&output_path, &result.validated, encoding, translation)?;
                return Err(AppError::from(e).into());
            }
        };
        self.persist(&output_path, &merged, encoding)
    }

    // @writes: Validated lines as a recovery file for a failed run
    fn store_progress(
        &self,
        output_path: &Path,
        validated: &[String],
        encoding: TextEncoding,
        translation: &NamedLines,
    ) -> Result<()> {
        FileManager::write_lines(output_path, validated, encoding).map_err(AppError::from)?;
        info!(
            "The state until the line causing this error has been stored in {:?}.",
            output_path
        );
        info!(
            "You might want to backup this results or replace regarding lines in {} with them.",
            translation.name
        );
        Ok(())
    }

    /// Normalize prefixes of a translation file on its own and write the result
    pub fn process_without_template(&self, translation: &NamedLines, encoding: TextEncoding) -> Result<Outcome> {
        info!("No template given, normalizing {} on its own", translation.name);
        let merged = merge_self(&translation.lines).map_err(AppError::from)?;
        self.persist(&self.output_path(), &merged, encoding)
    }

    fn persist(&self, output_path: &Path, lines: &[String], encoding: TextEncoding) -> Result<Outcome> {
        FileManager::write_lines(output_path, lines, encoding).map_err(AppError::from)?;
        info!("Success: {} lines written to {:?}", lines.len(), output_path);
        Ok(Outcome {
            output_path: output_path.to_path_buf(),
            lines_written: lines.len(),
        })
    }
}

// @returns: File name for reports, full path if there is none
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether an error returned by the controller is a rejected validation
pub fn is_rejected(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<AppError>(),
        Some(AppError::Validation(ValidationError::Rejected { .. }))
    )
}
