//! Output file conflict resolution.
//!
//! When the intended output path already exists, a [`ConflictPolicy`] decides
//! what happens: overwrite it, pick a numbered sibling name, give up, or ask
//! the user. The interactive mode reads from any `BufRead` and writes to any
//! `Write` so it can be driven by scripted input.

use clap::ValueEnum;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Strategy for handling an already-existing output path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConflictPolicy {
    /// Ask interactively
    #[default]
    Prompt,
    /// Overwrite the existing file
    Replace,
    /// Write to a numbered sibling, e.g. `title(1).txt`
    Rename,
    /// Leave the existing file alone and write nothing
    Abort,
}

/// Answer to the interactive conflict prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Replace,
    Create,
    Abort,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "R" | "REPLACE" => Some(Choice::Replace),
            "C" | "CREATE" => Some(Choice::Create),
            "A" | "ABORT" => Some(Choice::Abort),
            _ => None,
        }
    }
}

/// Find the first free `stem(N).ext` sibling of an existing path.
///
/// Given `dir/file.txt`, tries `dir/file(1).txt`, `dir/file(2).txt`, ... and
/// returns the first one that does not exist. Existence is re-checked on disk
/// for every candidate. A path without extension yields `dir/file(N)`.
pub fn unique_path(candidate: &Path) -> PathBuf {
    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u64 = 1;
    loop {
        let path = parent.join(format!("{}({}){}", stem, counter, extension));
        if !path.exists() {
            return path;
        }
        counter += 1;
    }
}

/// Decide which path to write to, given the policy.
///
/// Returns `Ok(None)` when nothing should be written. Any `Some` path is the
/// one to write; it differs from `intended` when a numbered sibling was chosen.
/// In prompt mode, invalid answers re-prompt without limit; end of input is
/// treated as abort.
pub fn resolve_conflict<R, W>(
    intended: &Path,
    policy: ConflictPolicy,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
{
    if !intended.exists() {
        return Ok(Some(intended.to_path_buf()));
    }

    tracing::debug!(path = %intended.display(), ?policy, "output file exists");

    let resolved = match policy {
        ConflictPolicy::Replace => Some(intended.to_path_buf()),
        ConflictPolicy::Abort => None,
        ConflictPolicy::Rename => Some(unique_path(intended)),
        ConflictPolicy::Prompt => prompt(intended, input, output)?,
    };

    Ok(resolved)
}

fn prompt<R, W>(intended: &Path, input: &mut R, output: &mut W) -> io::Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "File already exists: {}", intended.display())?;

    loop {
        write!(output, "Choose: [R]eplace, [C]reate new, [A]bort: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            tracing::warn!("no answer on input, aborting");
            return Ok(None);
        }

        match Choice::parse(&line) {
            Some(Choice::Replace) => return Ok(Some(intended.to_path_buf())),
            Some(Choice::Create) => return Ok(Some(unique_path(intended))),
            Some(Choice::Abort) => return Ok(None),
            None => writeln!(output, "Invalid choice. Please enter R, C, or A.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn existing(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, "existing").unwrap();
        path
    }

    fn run(path: &Path, policy: ConflictPolicy, answers: &str) -> (Option<PathBuf>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = resolve_conflict(path, policy, &mut input, &mut output).unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_missing_path_returned_for_every_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");
        for policy in ConflictPolicy::value_variants() {
            let (result, printed) = run(&path, *policy, "");
            assert_eq!(result, Some(path.clone()));
            assert!(printed.is_empty());
        }
    }

    #[test]
    fn test_replace_returns_intended() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        assert_eq!(run(&path, ConflictPolicy::Replace, "").0, Some(path));
    }

    #[test]
    fn test_abort_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        assert_eq!(run(&path, ConflictPolicy::Abort, "").0, None);
    }

    #[test]
    fn test_rename_picks_numbered_sibling() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, _) = run(&path, ConflictPolicy::Rename, "");
        assert_eq!(result, Some(dir.path().join("t(1).txt")));
    }

    #[test]
    fn test_unique_path_skips_taken_numbers() {
        let dir = TempDir::new().unwrap();
        let base = existing(&dir, "test.txt");
        existing(&dir, "test(1).txt");
        existing(&dir, "test(2).txt");

        let result = unique_path(&base);
        assert_eq!(result, dir.path().join("test(3).txt"));
        assert!(!result.exists());
    }

    #[test]
    fn test_unique_path_fills_smallest_gap() {
        let dir = TempDir::new().unwrap();
        let base = existing(&dir, "test.txt");
        existing(&dir, "test(2).txt");

        assert_eq!(unique_path(&base), dir.path().join("test(1).txt"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let dir = TempDir::new().unwrap();
        let base = existing(&dir, "test");
        assert_eq!(unique_path(&base), dir.path().join("test(1)"));
    }

    #[test]
    fn test_unique_path_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let base = existing(&dir, "a.json");
        let first = unique_path(&base);
        assert_eq!(unique_path(&base), first);
        assert!(!first.exists());
    }

    #[test]
    fn test_prompt_replace() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, printed) = run(&path, ConflictPolicy::Prompt, "R\n");
        assert_eq!(result, Some(path.clone()));
        assert!(printed.contains(&format!("File already exists: {}", path.display())));
    }

    #[test]
    fn test_prompt_create() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, _) = run(&path, ConflictPolicy::Prompt, "c\n");
        assert_eq!(result, Some(dir.path().join("t(1).txt")));
    }

    #[test]
    fn test_prompt_abort_long_form() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, _) = run(&path, ConflictPolicy::Prompt, "  abort  \n");
        assert_eq!(result, None);
    }

    #[test]
    fn test_prompt_invalid_then_valid() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, printed) = run(&path, ConflictPolicy::Prompt, "X\ninvalid\n\nreplace\n");
        assert_eq!(result, Some(path));
        assert_eq!(
            printed
                .matches("Invalid choice. Please enter R, C, or A.")
                .count(),
            3
        );
    }

    #[test]
    fn test_prompt_end_of_input_aborts() {
        let dir = TempDir::new().unwrap();
        let path = existing(&dir, "t.txt");
        let (result, _) = run(&path, ConflictPolicy::Prompt, "nope\n");
        assert_eq!(result, None);
    }
}
