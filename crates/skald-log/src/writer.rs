use crate::paths::SkaldPaths;
use skald_core::{Advisories, FailureClass, Notify};
use std::io::{BufRead, Write};
use std::sync::Arc;

/// The durable activity log. Every component funnels its writes through
/// [`ActivityLog::append`]; nothing else touches the log file.
///
/// Logging is best-effort: `append` never fails to the caller. Expected
/// failure modes (missing directory, unwritable file) self-heal where
/// possible and otherwise surface one advisory per failure class for the
/// lifetime of this instance, after which the entry is dropped silently.
pub struct ActivityLog {
    pub paths: SkaldPaths,
    notifier: Arc<dyn Notify>,
    advisories: Advisories,
}

impl ActivityLog {
    pub fn new(paths: SkaldPaths, notifier: Arc<dyn Notify>) -> Self {
        Self {
            paths,
            notifier,
            advisories: Advisories::new(),
        }
    }

    /// Append one timestamped entry: `[<rfc3339>] <content>\n\n`.
    ///
    /// Entries are appended to the end of the file, so file order equals
    /// call order and interleaved writers cannot corrupt each other: each
    /// entry is a single bounded write on a file opened in append mode.
    pub fn append(&mut self, content: &str) {
        let entry = format!("[{}] {content}\n\n", skald_core::now_rfc3339());

        if let Some(parent) = self.paths.log_file.parent() {
            if !parent.is_dir() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    self.advisories.warn_once(
                        self.notifier.as_ref(),
                        FailureClass::MissingDir,
                        &format!(
                            "log directory {} is missing and could not be created: {e}",
                            parent.display()
                        ),
                    );
                    return;
                }
            }
        }

        if let Err(e) = append_raw(&self.paths, &entry) {
            self.advisories.warn_once(
                self.notifier.as_ref(),
                FailureClass::WriteFailed,
                &format!(
                    "failed to write to log file {}: {e}",
                    self.paths.log_file.display()
                ),
            );
        }
    }

    /// Idempotent directory + file creation for the "ensure log resources
    /// exist" operation. Returns whether the log is ready for writes.
    pub fn ensure_resources(&mut self) -> bool {
        if let Err(e) = self.paths.ensure_layout() {
            self.advisories.warn_once(
                self.notifier.as_ref(),
                FailureClass::MissingDir,
                &format!(
                    "could not create logs directory {}: {e}",
                    self.paths.logs_dir.display()
                ),
            );
            return false;
        }
        if !self.paths.log_file_exists() {
            if let Err(e) = std::fs::File::create(&self.paths.log_file) {
                self.advisories.warn_once(
                    self.notifier.as_ref(),
                    FailureClass::MissingFile,
                    &format!(
                        "could not create log file {}: {e}",
                        self.paths.log_file.display()
                    ),
                );
                return false;
            }
        }
        true
    }

    /// Read the first `limit` non-empty lines of the log for display.
    /// A missing log file yields an empty list, not an error.
    pub fn head_lines(&self, limit: usize) -> Vec<String> {
        let file = match std::fs::File::open(&self.paths.log_file) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };
        std::io::BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .take(limit)
            .collect()
    }

    /// Number of entries currently in the log (lines opening with `[`).
    pub fn entry_count(&self) -> usize {
        let content = match std::fs::read_to_string(&self.paths.log_file) {
            Ok(c) => c,
            Err(_) => return 0,
        };
        content.lines().filter(|l| l.starts_with('[')).count()
    }
}

/// The single write per entry: open in append mode, write the whole
/// formatted entry at once.
fn append_raw(paths: &SkaldPaths, entry: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;
    file.write_all(entry.as_bytes())?;
    Ok(())
}
