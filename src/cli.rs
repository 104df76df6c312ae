//! Command-line interface argument parsing.
//!
//! This module handles parsing command-line arguments using clap's derive macros
//! and converts them into a [`RunConfig`] for the orchestrator.

use crate::config::{OutputFormat, RunConfig};
use crate::conflict::ConflictPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Transcript extractor - save YouTube captions as text or JSON
#[derive(Parser, Debug)]
#[command(
    name = "transcript-extractor",
    version,
    about = "Extract transcripts from YouTube videos with timestamps",
    after_help = "Examples:\n  \
                  transcript-extractor https://www.youtube.com/watch?v=dQw4w9WgXcQ\n  \
                  transcript-extractor https://youtu.be/dQw4w9WgXcQ --output transcript.txt\n  \
                  transcript-extractor https://www.youtube.com/watch?v=dQw4w9WgXcQ --language es --format json\n  \
                  transcript-extractor https://www.youtube.com/watch?v=dQw4w9WgXcQ --list-languages"
)]
pub struct Args {
    /// YouTube video URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output filename, placed under the output directory unless absolute
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Language code for transcript (e.g., en, es, fr)
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// List available languages for the video and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Exclude timestamps from text output
    #[arg(long)]
    pub no_timestamps: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// What to do when the output file already exists
    #[arg(long, value_enum, default_value_t = ConflictPolicy::Prompt)]
    pub conflict: ConflictPolicy,

    /// Directory for relative output names
    #[arg(long, value_name = "DIR", default_value = crate::config::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Args {
    /// Convert parsed arguments into the orchestrator's configuration.
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            url: self.url,
            output: self.output,
            output_dir: self.output_dir,
            format: self.format,
            language: self.language,
            list_languages: self.list_languages,
            no_timestamps: self.no_timestamps,
            verbose: self.verbose,
            conflict: self.conflict,
        }
    }
}
