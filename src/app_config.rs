use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Encoding of the input and output files, `None` to try UTF-8 then Windows-1252
    pub encoding: Option<TextEncoding>,

    /// Location of the merged output file
    pub output_file: String,

    /// Ask for decisions on divergent lines
    pub interactive: bool,

    /// Log level
    pub log_level: LogLevel,
}

/// Supported file encodings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    // @encoding: UTF-8
    #[serde(rename = "utf-8")]
    Utf8,
    // @encoding: Windows-1252
    #[serde(rename = "cp1252")]
    Cp1252,
}

impl TextEncoding {
    // @returns: encoding_rs codec for this encoding
    pub fn codec(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Cp1252 => encoding_rs::WINDOWS_1252,
        }
    }

    // @returns: Label as used on the command line and in config files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Cp1252 => "cp1252",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "cp1252" | "windows-1252" => Ok(Self::Cp1252),
            _ => Err(anyhow!("Invalid encoding: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_file() -> String {
    "merged.trs".to_string()
}

impl Config {
    /// Load the configuration from `path`, writing a default one if the file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.output_file.trim().is_empty() {
            return Err(anyhow!("Output file must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            encoding: None,
            output_file: default_output_file(),
            interactive: true,
            log_level: LogLevel::default(),
        }
    }
}
