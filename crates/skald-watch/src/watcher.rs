use notify::event::EventKind;
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use thiserror::Error;

/// One batch of text newly written to a watched file.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDelta {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum WatchSetupError {
    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),
}

/// Live edit-event source: subscribes to filesystem change notifications
/// under a path and turns them into text deltas by tracking a byte
/// offset per file and reading only what was appended since last time.
///
/// The subscription lives exactly as long as this value; dropping it
/// releases the underlying watcher, after which no further deltas arrive.
pub struct EditWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
    offsets: HashMap<PathBuf, u64>,
}

impl EditWatcher {
    /// Start watching `path` (a file or a directory, recursively).
    pub fn watch(path: &Path) -> Result<Self, WatchSetupError> {
        let (tx, rx) = channel::<PathBuf>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        for path in event.paths {
                            let _ = tx.send(path);
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!("watch error: {error}");
                }
            },
            NotifyConfig::default(),
        )?;

        watcher.watch(path, RecursiveMode::Recursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            offsets: HashMap::new(),
        })
    }

    /// Block up to `timeout` for the next non-empty edit delta.
    /// Returns `None` when the timeout elapses quietly.
    pub fn next_delta(&mut self, timeout: Duration) -> Option<EditDelta> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            match self.rx.recv_timeout(remaining) {
                Ok(path) => {
                    if let Some(delta) = self.consume(&path) {
                        return Some(delta);
                    }
                    // Empty or unreadable change, keep waiting.
                }
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn consume(&mut self, path: &Path) -> Option<EditDelta> {
        if !path.is_file() {
            return None;
        }
        let offset = self.offsets.get(path).copied().unwrap_or(0);
        let (text, new_offset) = match read_from_offset(path, offset) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("cannot read {}: {e}", path.display());
                return None;
            }
        };
        self.offsets.insert(path.to_path_buf(), new_offset);
        if text.is_empty() {
            return None;
        }
        Some(EditDelta {
            path: path.to_path_buf(),
            text,
        })
    }
}

/// Read everything past `offset`, returning the text and the new offset.
/// A file shorter than the stored offset was truncated and is re-read
/// from the start.
fn read_from_offset(path: &Path, offset: u64) -> std::io::Result<(String, u64)> {
    let mut file = std::fs::File::open(path)?;
    let len = file.metadata()?.len();
    let start = if len < offset { 0 } else { offset };
    if len == start {
        return Ok((String::new(), len));
    }
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::with_capacity((len - start) as usize);
    file.read_to_end(&mut buf)?;
    Ok((String::from_utf8_lossy(&buf).into_owned(), len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_from_offset_returns_only_new_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.txt");
        std::fs::write(&path, "hello").unwrap();

        let (text, offset) = read_from_offset(&path, 0).unwrap();
        assert_eq!(text, "hello");
        assert_eq!(offset, 5);

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b" world").unwrap();
        drop(file);

        let (text, offset) = read_from_offset(&path, offset).unwrap();
        assert_eq!(text, " world");
        assert_eq!(offset, 11);

        let (text, _) = read_from_offset(&path, offset).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn truncated_file_is_reread_from_start() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.txt");
        std::fs::write(&path, "a long first version").unwrap();
        let (_, offset) = read_from_offset(&path, 0).unwrap();

        std::fs::write(&path, "short").unwrap();
        let (text, offset) = read_from_offset(&path, offset).unwrap();
        assert_eq!(text, "short");
        assert_eq!(offset, 5);
    }

    #[test]
    fn watcher_delivers_appended_text() {
        let tmp = tempfile::tempdir().unwrap();
        let mut watcher = EditWatcher::watch(tmp.path()).unwrap();

        let path = tmp.path().join("doc.txt");
        std::fs::write(&path, "copilot wrote this").unwrap();

        let delta = watcher
            .next_delta(Duration::from_secs(5))
            .expect("no delta for file creation");
        assert_eq!(delta.path, path);
        assert_eq!(delta.text, "copilot wrote this");

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b" and more").unwrap();
        file.flush().unwrap();
        drop(file);

        let delta = watcher
            .next_delta(Duration::from_secs(5))
            .expect("no delta for append");
        assert_eq!(delta.text, " and more");
    }

    #[test]
    fn quiet_watch_times_out() {
        let tmp = tempfile::tempdir().unwrap();
        let mut watcher = EditWatcher::watch(tmp.path()).unwrap();
        assert!(watcher.next_delta(Duration::from_millis(50)).is_none());
    }
}
