//! Configuration for the EXIF reader and the `exif-dump` binary.
//!
//! [`ReaderConfig`] holds the knobs the library needs. [`Cli`] is the
//! command-line surface of the binary and maps onto a `ReaderConfig`.
//!
//! # Environment Variables
//!
//! Options of the binary can also be set via environment variables with the
//! `EXIF_` prefix:
//!
//! - `EXIF_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_MAX_SIZE` - Largest input file in bytes (default: 64 MiB)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default cap on input size (64 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// Reader Configuration
// =============================================================================

/// Settings for [`crate::ExifReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Inputs larger than this are rejected before any parsing.
    pub max_input_size: usize,

    /// Follow the Interoperability pointer found in the EXIF directory.
    ///
    /// Decoding Interop goes one hop past IFD0, EXIF and GPS. It is on by
    /// default; turning it off restricts the document to those three.
    pub follow_interop: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            follow_interop: true,
        }
    }
}

impl ReaderConfig {
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    pub fn with_follow_interop(mut self, follow: bool) -> Self {
        self.follow_interop = follow;
        self
    }

    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_size == 0 {
            return Err("max_input_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Output format for `exif-dump`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `name = value` line per tag
    #[default]
    Text,
    /// One JSON object per file
    Json,
}

/// exif-dump - Print the EXIF metadata of JPEG files.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-dump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JPEG files to read.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_FORMAT")]
    pub format: OutputFormat,

    /// Largest accepted input file in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_SIZE, env = "EXIF_MAX_SIZE")]
    pub max_size: usize,

    /// Do not follow the Interoperability directory.
    #[arg(long, default_value_t = false)]
    pub no_interop: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Reader settings selected on the command line.
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default()
            .with_max_input_size(self.max_size)
            .with_follow_interop(!self.no_interop)
    }

    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }
        self.reader_config()
            .validate()
            .map_err(|e| format!("{} (set --max-size or EXIF_MAX_SIZE)", e))
    }
}

// =============================================================================
// Tests
// =============================================================================
