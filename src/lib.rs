/*!
 * # trsmerge - Translation file reconciliation
 *
 * A Rust library for bringing outdated translation files up to date with a
 * newer translation template.
 *
 * ## Features
 *
 * - Validate an outdated translation against a template line by line
 * - Carry prefix markers like `&31 ` from English lines to their translations
 * - Resolve changed English lines interactively or report them all at once
 * - Merge human translations with template defaults
 * - UTF-8 and Windows-1252 files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `reconcile`: The line pairing core:
 *   - `reconcile::prefix`: Prefix extraction and the shared line-role state machine
 *   - `reconcile::validator`: Validation and diagnostics
 *   - `reconcile::merger`: Merging validated lines with the template
 *   - `reconcile::decision`: Interactive and headless decision providers
 * - `app_config`: Configuration management
 * - `file_utils`: Reading and writing translation files
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(non_snake_case)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod reconcile;

// Re-export main types for easier usage
pub use app_config::{Config, TextEncoding};
pub use app_controller::{Controller, Outcome};
pub use errors::{AppError, DecisionError, FileError, MergeError, ValidationError};
pub use reconcile::{merge, merge_self, Diagnostic, DiagnosticKind, NamedLines, ValidationResult, Validator};
