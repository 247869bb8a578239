/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use trsmerge::app_config::TextEncoding;
use trsmerge::errors::FileError;
use trsmerge::file_utils::FileManager;
use crate::common;

/// Test that UTF-8 files are detected and split into lines
#[test]
fn test_read_lines_withUtf8File_shouldDetectUtf8() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "utf8.trs", "&1 Open\r\n&1 Öffnen\r\n")?;

    let (lines, encoding) = FileManager::read_lines(&path, None)?;

    assert_eq!(encoding, TextEncoding::Utf8);
    assert_eq!(lines, vec!["&1 Open", "&1 Öffnen"]);

    Ok(())
}

/// Test that invalid UTF-8 falls back to Windows-1252
#[test]
fn test_read_lines_withCp1252Bytes_shouldFallBackToCp1252() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("cp1252.trs");
    // "Schlie\xdfen" is "Schließen" in Windows-1252
    fs::write(&path, b"Close\nSchlie\xdfen")?;

    let (lines, encoding) = FileManager::read_lines(&path, None)?;

    assert_eq!(encoding, TextEncoding::Cp1252);
    assert_eq!(lines, vec!["Close", "Schließen"]);

    Ok(())
}

/// Test that an explicit UTF-8 encoding rejects invalid bytes
#[test]
fn test_read_lines_withExplicitUtf8AndInvalidBytes_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("broken.trs");
    fs::write(&path, b"Schlie\xdfen")?;

    let result = FileManager::read_lines(&path, Some(TextEncoding::Utf8));

    assert!(matches!(result, Err(FileError::Malformed { encoding: "utf-8", .. })));

    Ok(())
}

/// Test that a missing file reports an I/O error
#[test]
fn test_read_lines_withMissingFile_shouldFail() {
    let result = FileManager::read_lines("./non_existent_file_12345.trs", None);
    assert!(matches!(result, Err(FileError::Io { .. })));
}

/// Test that lines are joined by single newlines and encoded as requested
#[test]
fn test_write_lines_withCp1252_shouldEncodeAndJoin() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.trs");

    FileManager::write_lines(&path, &["Close", "Schließen"], TextEncoding::Cp1252)?;

    assert_eq!(fs::read(&path)?, b"Close\nSchlie\xdfen".to_vec());

    Ok(())
}

/// Test that characters outside Windows-1252 are rejected
#[test]
fn test_write_lines_withUnencodableText_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.trs");

    let result = FileManager::write_lines(&path, &["Close", "閉じる"], TextEncoding::Cp1252);

    assert!(matches!(result, Err(FileError::Unencodable { .. })));
    assert!(!path.exists());

    Ok(())
}
