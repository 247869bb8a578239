/*!
 * Tests for merging validated translation lines with templates
 */

use trsmerge::errors::MergeError;
use trsmerge::reconcile::{merge, merge_self, NamedLines, Validator};

#[test]
fn test_merge_withPreferredTranslation_shouldWin() {
    let merged = merge(
        &["&31 english text", "&31 german text"],
        &["&31 english text", "&31 will be lost"],
    )
    .unwrap();
    assert_eq!(merged, vec!["&31 english text", "&31 german text"]);
}

#[test]
fn test_merge_withPrefixOnlyPreferred_shouldFallBack() {
    let merged = merge(
        &["&31 english text", "&31 "],
        &["&31 english text", "&31 won't be lost"],
    )
    .unwrap();
    assert_eq!(merged, vec!["&31 english text", "&31 won't be lost"]);
}

#[test]
fn test_merge_withEmptyFallbackTranslation_shouldKeepPreferredPrefix() {
    let merged = merge(&["&31 english text", "&31 german text"], &["&31 english text", ""]).unwrap();
    assert_eq!(merged, vec!["&31 english text", "&31 german text"]);
}

#[test]
fn test_merge_withUnprefixedFallbackTranslation_shouldPrefixIt() {
    let merged = merge(&["&31 english text", ""], &["&31 english text", "new german text"]).unwrap();
    assert_eq!(merged, vec!["&31 english text", "&31 new german text"]);
}

#[test]
fn test_merge_shouldAlwaysTakeEnglishLinesFromFallback() {
    let merged = merge(
        &["old english", "german text", "&2 also old", "&2 zweiter"],
        &["&1 new english", "", "&2 also new", ""],
    )
    .unwrap();
    assert_eq!(merged, vec!["&1 new english", "&1 german text", "&2 also new", "&2 zweiter"]);
}

#[test]
fn test_merge_withoutPrefixes_shouldPreferNonEmptyTranslation() {
    let merged = merge(&["one", "", "two", "zwei"], &["one", "eins", "two", "deux"]).unwrap();
    assert_eq!(merged, vec!["one", "eins", "two", "zwei"]);
}

#[test]
fn test_merge_withContradictingFallbackPrefix_shouldReportInvalidState() {
    let result = merge(&["&31 english text", "german"], &["&31 english text", "&30 default"]);
    assert_eq!(result, Err(MergeError::InvalidState { line: 2 }));
}

#[test]
fn test_mergeSelf_shouldBeIdempotent() {
    let lines = vec![
        "&1 first".to_string(),
        "&1 erste".to_string(),
        "// comment".to_string(),
        "// Kommentar".to_string(),
        "plain".to_string(),
        "".to_string(),
    ];
    assert_eq!(merge_self(&lines).unwrap(), lines);
}

#[test]
fn test_mergeSelf_withUnprefixedTranslations_shouldAddPrefixes() {
    let merged = merge_self(&["&1 first\r\n", "erste\r\n", "&2 second", ""]).unwrap();
    assert_eq!(merged, vec!["&1 first", "&1 erste", "&2 second", "&2 "]);
}

#[test]
fn test_validateThenMerge_shouldCombineTranslationsWithTemplate() {
    let outdated = NamedLines::new("old.trs", ["english text", "german text", "more", ""]);
    let template = NamedLines::new("new.trs", ["&31 english text", "", "&32 more", "&32 mehr"]);

    let result = Validator::headless().validate(&outdated, &template);
    assert!(result.is_success());

    let merged = merge(&result.validated, &template.lines).unwrap();
    assert_eq!(merged, vec!["&31 english text", "&31 german text", "&32 more", "&32 mehr"]);
}
