//! Run orchestration: URL to transcript file.
//!
//! [`run`] sequences the whole pipeline for one video. Every stage may fail
//! and short-circuits with an [`ExtractError`]; the caller decides how to
//! report it. Console output goes to the injected writer and prompt answers
//! come from the injected reader.

use crate::config::{OutputFormat, RunConfig};
use crate::conflict::resolve_conflict;
use crate::error::ExtractError;
use crate::sanitize::sanitize_filename;
use crate::transcript::Transcript;
use crate::video_id::extract_video_id;
use crate::youtube::{TitleLookup, TranscriptSource};
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Languages were listed; nothing was fetched or written.
    ListedLanguages,
    /// The transcript was written to `path`.
    Saved { path: PathBuf, intended: PathBuf },
    /// The output file existed and the conflict policy chose not to write.
    Aborted { intended: PathBuf },
}

/// Execute one extraction run.
///
/// # Errors
///
/// - `ExtractError::InvalidUrl` if no video ID is found in `config.url`
/// - `ExtractError::Retrieval` if captions or the language list are unavailable
/// - `ExtractError::CreateDir`/`Write` on local filesystem failures
pub fn run<S, R, W>(
    config: &RunConfig,
    source: &S,
    input: &mut R,
    out: &mut W,
) -> Result<RunOutcome, ExtractError>
where
    S: TranscriptSource + ?Sized,
    R: BufRead,
    W: Write,
{
    if config.verbose {
        writeln!(out, "Extracting video ID from URL: {}", config.url)?;
    }
    let video_id = extract_video_id(&config.url)?;
    if config.verbose {
        writeln!(out, "Video ID: {}", video_id)?;
    }

    if config.list_languages {
        if config.verbose {
            writeln!(out, "Fetching available languages...")?;
        }
        let languages = source.list_languages(&video_id)?;
        writeln!(out)?;
        writeln!(out, "Available transcript languages:")?;
        writeln!(out, "{}", "=".repeat(40))?;
        for language in &languages {
            writeln!(out, "{}", language.listing_line())?;
        }
        return Ok(RunOutcome::ListedLanguages);
    }

    if config.verbose {
        match &config.language {
            Some(language) => writeln!(out, "Retrieving transcript in {}...", language)?,
            None => writeln!(out, "Retrieving transcript...")?,
        }
    }
    let transcript = source.fetch_transcript(&video_id, config.language.as_deref())?;
    if config.verbose {
        writeln!(out, "Retrieved {} transcript entries", transcript.len())?;
        writeln!(out, "Fetching video title...")?;
    }

    let lookup = source.fetch_title(&video_id);
    if lookup == TitleLookup::Unavailable {
        tracing::info!(%video_id, "title unavailable, naming file after video ID");
    }
    let title = lookup.into_name(&video_id);
    if config.verbose {
        writeln!(out, "Video title: {}", title)?;
    }
    let stem = sanitize_filename(&title);

    fs::create_dir_all(&config.output_dir).map_err(|source| ExtractError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let intended = config.intended_path(&stem);
    let Some(path) = resolve_conflict(&intended, config.conflict, input, out)? else {
        writeln!(out, "Operation aborted. No file was written.")?;
        return Ok(RunOutcome::Aborted { intended });
    };

    let contents = render(&transcript, config)?;
    fs::write(&path, contents).map_err(|source| ExtractError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), entries = transcript.len(), "transcript written");

    if path != intended {
        writeln!(out, "Using filename: {}", path.display())?;
    }
    writeln!(out, "Transcript saved to: {}", path.display())?;

    if config.verbose {
        writeln!(out)?;
        writeln!(out, "Preview (first 3 entries):")?;
        writeln!(out, "{}", "-".repeat(30))?;
        for line in transcript.preview() {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(RunOutcome::Saved { path, intended })
}

/// Serialize the transcript in the configured format.
fn render(transcript: &Transcript, config: &RunConfig) -> Result<String, ExtractError> {
    match config.format {
        OutputFormat::Json => transcript.to_json().map_err(ExtractError::transcript),
        OutputFormat::Text if config.no_timestamps => Ok(transcript.to_plain_text()),
        OutputFormat::Text => Ok(transcript.to_text()),
    }
}
