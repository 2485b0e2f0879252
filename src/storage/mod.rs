//! Markdown log storage.
//!
//! Logs are plain files named `YYMMDD-HHMM-<slug>.md` (local time) inside a
//! single directory, created on first write. Writing to an existing name
//! overwrites it.
//!
//! # Example
//!
//! ```
//! use scenario_timeline::storage::slugify;
//!
//! assert_eq!(slugify("Mars Colony: Phase 2!", "session"), "mars-colony-phase-2");
//! assert_eq!(slugify("???", "session"), "session");
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::error::StorageError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 40;

/// Slug fallback for exported sessions.
pub const SESSION_SLUG_FALLBACK: &str = "session";

/// Slug fallback for generated timelines and reports.
pub const SCENARIO_SLUG_FALLBACK: &str = "scenario";

/// Turn free text into a file-name slug.
///
/// Lowercases, replaces each run of characters outside `[a-z0-9]` with one
/// `-`, trims leading and trailing dashes, then keeps the first 40
/// characters. An empty result becomes `fallback`.
#[must_use]
pub fn slugify(text: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Build a log file name from a timestamp and a slug.
///
/// # Example
///
/// ```
/// use chrono::{Local, TimeZone};
/// use scenario_timeline::storage::log_filename;
///
/// let at = Local.with_ymd_and_hms(2026, 3, 9, 7, 5, 0).unwrap();
/// assert_eq!(log_filename(&at, "fusion"), "260309-0705-fusion.md");
/// ```
#[must_use]
pub fn log_filename(at: &DateTime<Local>, slug: &str) -> String {
    format!("{}-{slug}.md", at.format("%y%m%d-%H%M"))
}

/// Whether a requested name is a plain file name inside the log directory.
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

/// Directory of Markdown logs.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    /// Create a store rooted at `dir`. The directory is created lazily.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The log directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `content` under a name derived from `at` and `title`.
    ///
    /// Returns the file name (not the full path).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CreateDirFailed`] or [`StorageError::WriteFailed`]
    /// on filesystem errors.
    pub async fn save(
        &self,
        at: &DateTime<Local>,
        title: &str,
        fallback_slug: &str,
        content: &str,
    ) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::CreateDirFailed {
                path: self.dir.display().to_string(),
                message: e.to_string(),
            })?;

        let filename = log_filename(at, &slugify(title, fallback_slug));
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| StorageError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(filename = %filename, bytes = content.len(), "Markdown log saved");
        Ok(filename)
    }

    /// Read a log back by file name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the name contains a path
    /// separator or `..`, or no such file exists, and
    /// [`StorageError::ReadFailed`] on other I/O errors.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        if !is_plain_filename(filename) {
            debug!(filename = %filename, "Rejected log name");
            return Err(StorageError::NotFound {
                filename: filename.to_string(),
            });
        }

        let path = self.dir.join(filename);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory
                ) =>
            {
                Err(StorageError::NotFound {
                    filename: filename.to_string(),
                })
            }
            Err(e) => Err(StorageError::ReadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}
