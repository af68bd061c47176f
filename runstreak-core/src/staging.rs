//! Export and file staging collaborators
//!
//! Downloading the archive from the third-party site and unpacking it are
//! external concerns; this module defines the seams ([`Exporter`] and
//! [`FileStager`]) plus the pieces of staging the pipeline owns itself:
//! header repair of the exported TSV and filesystem cleanup on both entry
//! and exit of a run.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Triggers the third-party export.
///
/// Implementations drive whatever mechanism produces the compressed archive,
/// typically headless browser automation against the hosting site. The
/// caller supplies the wait budget; the pipeline itself verifies the archive
/// actually exists afterwards rather than trusting the wait as a success
/// proxy.
pub trait Exporter {
    /// Produce the archive at `archive_path`, taking at most `wait_secs`.
    fn export(&self, archive_path: &Path, wait_secs: u64) -> Result<()>;
}

/// Prepares the downloaded archive for parsing.
///
/// Given the archive path and an extraction directory, returns the path to a
/// single cleaned tab-separated file ready for the normalizer.
pub trait FileStager {
    fn stage(&self, archive_path: &Path, extract_dir: &Path) -> Result<PathBuf>;
}

/// Stager for an archive that has already been unpacked out-of-band.
///
/// Expects `extract_dir/log.txt` to exist and applies the header repair the
/// export format needs (see [`repair_header`]).
#[derive(Debug, Default)]
pub struct ExtractedLogStager;

impl FileStager for ExtractedLogStager {
    fn stage(&self, archive_path: &Path, extract_dir: &Path) -> Result<PathBuf> {
        let log_file = extract_dir.join("log.txt");
        if !log_file.exists() {
            return Err(Error::Staging(format!(
                "expected extracted log file at {} (archive: {})",
                log_file.display(),
                archive_path.display()
            )));
        }

        repair_header(&log_file)?;
        Ok(log_file)
    }
}

/// Remove the trailing tab from the header row of an exported log file.
///
/// The export format emits one extra tab character at the end of the header
/// row only; left in place it shifts every column name off by one.
pub fn repair_header(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)?;

    let Some((header, rest)) = content.split_once('\n') else {
        return Err(Error::Staging(format!(
            "log file {} has no data rows",
            path.display()
        )));
    };

    let trimmed = header.trim_end_matches('\r').trim_end_matches('\t');
    if trimmed.len() == header.trim_end_matches('\r').len() {
        tracing::debug!(path = %path.display(), "Header already clean, no repair needed");
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "Stripping trailing tab from header row");
    let mut repaired = String::with_capacity(content.len());
    repaired.push_str(trimmed);
    repaired.push('\n');
    repaired.push_str(rest);
    std::fs::write(path, repaired)?;
    Ok(())
}

/// Delete the archive and extraction directory if they exist.
///
/// Runs at the start and end of every pipeline run so no stale download or
/// extraction artifacts persist between runs.
pub fn cleanup(archive_path: &Path, extract_dir: &Path) -> Result<()> {
    if archive_path.exists() {
        tracing::debug!(path = %archive_path.display(), "Removing stale archive");
        std::fs::remove_file(archive_path)?;
    }
    if extract_dir.exists() {
        tracing::debug!(path = %extract_dir.display(), "Removing extraction directory");
        std::fs::remove_dir_all(extract_dir)?;
    }
    Ok(())
}

/// Guard that re-runs [`cleanup`] when dropped, success or failure.
pub struct CleanupGuard {
    archive_path: PathBuf,
    extract_dir: PathBuf,
}

impl CleanupGuard {
    /// Clean up immediately (entry), then arm cleanup-on-drop (exit).
    pub fn new(archive_path: &Path, extract_dir: &Path) -> Result<Self> {
        cleanup(archive_path, extract_dir)?;
        Ok(Self {
            archive_path: archive_path.to_path_buf(),
            extract_dir: extract_dir.to_path_buf(),
        })
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = cleanup(&self.archive_path, &self.extract_dir) {
            tracing::warn!(error = %e, "Exit cleanup failed");
        }
    }
}
