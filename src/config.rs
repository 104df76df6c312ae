//! Run configuration passed into the orchestrator.

use crate::conflict::ConflictPolicy;
use clap::ValueEnum;
use std::path::PathBuf;

/// Directory relative output names are placed under.
pub const DEFAULT_OUTPUT_DIR: &str = "transcripts";

/// On-disk transcript format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `[MM:SS] text` lines
    #[default]
    Text,
    /// JSON array of caption entries
    Json,
}

impl OutputFormat {
    /// File extension used when the output name is derived from the title.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Everything one run needs, independent of how it was parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub url: String,
    /// Explicit output filename or absolute path.
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub language: Option<String>,
    pub list_languages: bool,
    pub no_timestamps: bool,
    pub verbose: bool,
    pub conflict: ConflictPolicy,
}

impl RunConfig {
    /// Configuration with defaults: text format, prompt on conflict, output
    /// under `transcripts/`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            language: None,
            list_languages: false,
            no_timestamps: false,
            verbose: false,
            conflict: ConflictPolicy::default(),
        }
    }

    /// Path the transcript should be written to before conflict resolution.
    ///
    /// An explicit absolute output is used as-is, an explicit relative one is
    /// placed under the output directory, otherwise `{stem}.{ext}` is used.
    pub fn intended_path(&self, stem: &str) -> PathBuf {
        match &self.output {
            Some(output) if output.is_absolute() => output.clone(),
            Some(output) => self.output_dir.join(output),
            None => self
                .output_dir
                .join(format!("{}.{}", stem, self.format.extension())),
        }
    }
}
