//! Error types and exit code handling for transcript extraction.
//!
//! Every failure that ends a run is an [`ExtractError`]. Validation failures
//! (the URL carried no recognizable video ID) are reported bare; everything
//! else is followed by a short list of likely causes.
//!
//! # Example
//!
//! ```rust,ignore
//! use transcript_extractor::error::ExtractError;
//!
//! let error = ExtractError::InvalidUrl { url: "not a url".into() };
//! assert!(error.is_validation());
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Likely causes printed after any non-validation failure.
pub const POSSIBLE_REASONS: [&str; 4] = [
    "- Video doesn't have captions/transcripts",
    "- Video is private or restricted",
    "- Invalid YouTube URL",
    "- Network connectivity issues",
];

/// Custom error type for transcript extraction runs.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No video ID could be parsed out of the input.
    #[error("Could not extract video ID from URL. Please check the URL format.")]
    InvalidUrl { url: String },

    /// Transcript or language list could not be retrieved.
    #[error("{context}: {reason}")]
    Retrieval { context: String, reason: String },

    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// Writing the transcript file failed.
    #[error("Failed to write output file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// Reading the conflict prompt answer or writing to the console failed.
    #[error("I/O error: {0}")]
    Console(#[from] io::Error),
}

impl ExtractError {
    /// Wrap an opaque transcript failure with its context message.
    pub fn transcript(reason: impl ToString) -> Self {
        ExtractError::Retrieval {
            context: "Error getting transcript".to_string(),
            reason: reason.to_string(),
        }
    }

    /// Wrap an opaque language-list failure with its context message.
    pub fn languages(reason: impl ToString) -> Self {
        ExtractError::Retrieval {
            context: "Error getting available languages".to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is a structural input error rather than a downstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ExtractError::InvalidUrl { .. })
    }

    /// Every caught error terminates the process with status 1.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }

    /// Print `Error: {message}` and, for non-validation errors, the
    /// possible-reasons block.
    pub fn report<W: Write>(&self, err: &mut W) -> io::Result<()> {
        writeln!(err, "Error: {}", self)?;
        if !self.is_validation() {
            writeln!(err)?;
            writeln!(err, "Possible reasons:")?;
            for reason in POSSIBLE_REASONS {
                writeln!(err, "{}", reason)?;
            }
        }
        Ok(())
    }
}
