/*!
 * Tests for error types and conversions
 */

use trsmerge::errors::{AppError, DecisionError, MergeError, ValidationError};

#[test]
fn test_mergeError_invalidState_shouldDisplayLine() {
    let error = MergeError::InvalidState { line: 42 };
    assert_eq!(format!("{}", error), "invalid file state around line 42");
}

#[test]
fn test_validationError_rejected_shouldDisplayReport() {
    let error = ValidationError::Rejected {
        report: "Some lines don't match: Line 1 differs".to_string(),
    };
    assert_eq!(format!("{}", error), "Some lines don't match: Line 1 differs");
}

#[test]
fn test_decisionError_inputClosed_shouldDisplayLine() {
    let error = DecisionError::InputClosed(3);
    assert_eq!(format!("{}", error), "Input closed while waiting for a new translation of line 3");
}

#[test]
fn test_appError_fromValidationError_shouldKeepReport() {
    let error: AppError = ValidationError::Rejected { report: "Line 1 differs".to_string() }.into();
    assert_eq!(format!("{}", error), "Validation error: Line 1 differs");
}

#[test]
fn test_appError_fromMergeError_shouldWrapCorrectly() {
    let error: AppError = MergeError::InvalidState { line: 2 }.into();
    assert!(format!("{}", error).starts_with("Merge error:"));
}
