use log::debug;
use std::fs;
use std::path::Path;

use crate::app_config::TextEncoding;
use crate::errors::FileError;

// @module: Reading and writing line oriented translation files

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|source| FileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Read a file as lines.
    ///
    /// With no encoding given, the file is decoded as UTF-8 if it is valid UTF-8
    /// and as Windows-1252 otherwise. Returns the lines and the encoding used.
    pub fn read_lines<P: AsRef<Path>>(
        path: P,
        encoding: Option<TextEncoding>,
    ) -> Result<(Vec<String>, TextEncoding), FileError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (text, used) = match encoding {
            Some(encoding) => {
                let (text, had_errors) = encoding.codec().decode_with_bom_removal(&bytes);
                if had_errors {
                    return Err(FileError::Malformed {
                        path: path.to_path_buf(),
                        encoding: encoding.label(),
                    });
                }
                (text.into_owned(), encoding)
            }
            None => {
                let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
                if had_errors {
                    debug!("{:?} is not valid UTF-8, falling back to cp1252", path);
                    let (text, _) = encoding_rs::WINDOWS_1252.decode_with_bom_removal(&bytes);
                    (text.into_owned(), TextEncoding::Cp1252)
                } else {
                    (text.into_owned(), TextEncoding::Utf8)
                }
            }
        };

        let lines = split_lines(&text);
        debug!("Read {} lines from {:?} ({})", lines.len(), path, used);
        Ok((lines, used))
    }

    /// Write lines joined by single newlines, without a trailing newline
    pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(
        path: P,
        lines: &[S],
        encoding: TextEncoding,
    ) -> Result<(), FileError> {
        let path = path.as_ref();
        let text = lines.iter().map(|line| line.as_ref()).collect::<Vec<&str>>().join("\n");

        let (bytes, _, had_errors) = encoding.codec().encode(&text);
        if had_errors {
            return Err(FileError::Unencodable {
                path: path.to_path_buf(),
                encoding: encoding.label(),
            });
        }

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, &bytes).map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Wrote {} lines to {:?} ({})", lines.len(), path, encoding);
        Ok(())
    }
}

/// Split text into lines at `\r\n`, `\r` or `\n`.
///
/// A trailing line break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + break_len..];
            }
            None => {
                lines.push(rest.to_string());
                rest = "";
            }
        }
    }

    lines
}
