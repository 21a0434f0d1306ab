use crate::normalize::{normalize, render, NormalizedSession};
use skald_core::{Advisories, Config, FailureClass, Notify};
use skald_log::ActivityLog;
use std::path::PathBuf;
use std::sync::Arc;

/// Subdirectory of each workspace that holds persisted chat sessions.
const CHAT_SESSIONS_DIR: &str = "chatSessions";

/// Scanner over the host editor's per-workspace chat-session store.
///
/// The store is read-only from skald's perspective; a scan never mutates
/// or deletes source files. Failures are isolated per file: one
/// unreadable session advises once and the rest of the scan continues.
pub struct SessionStore {
    root: Option<PathBuf>,
    config: Config,
    notifier: Arc<dyn Notify>,
    advisories: Advisories,
}

impl SessionStore {
    pub fn new(config: Config, notifier: Arc<dyn Notify>) -> Self {
        Self {
            root: resolve_root(&config),
            config,
            notifier,
            advisories: Advisories::new(),
        }
    }

    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    /// Normalize every session file in the store, in directory-listing
    /// order (workspaces outer, files inner). An absent root is not an
    /// error: the scan yields nothing after a one-time advisory.
    pub fn scan(&mut self) -> Vec<NormalizedSession> {
        let mut sessions = Vec::new();
        self.for_each_session(|session| sessions.push(session));
        sessions
    }

    /// Streaming variant: render and append each record directly instead
    /// of buffering the whole set. Returns the number of sessions logged.
    pub fn scan_and_log(&mut self, log: &mut ActivityLog) -> usize {
        let mut count = 0;
        self.for_each_session(|session| {
            log.append(&render(&session));
            count += 1;
        });
        count
    }

    fn for_each_session(&mut self, mut handle: impl FnMut(NormalizedSession)) {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => {
                self.advisories.warn_once(
                    self.notifier.as_ref(),
                    FailureClass::StorageRootUnavailable,
                    "no platform config directory available; skipping chat session scan",
                );
                return;
            }
        };
        if !root.is_dir() {
            self.advisories.warn_once(
                self.notifier.as_ref(),
                FailureClass::StorageRootUnavailable,
                &format!(
                    "chat session store {} not found; scan skipped",
                    root.display()
                ),
            );
            return;
        }

        let workspaces = match std::fs::read_dir(&root) {
            Ok(entries) => entries,
            Err(e) => {
                self.advisories.warn_once(
                    self.notifier.as_ref(),
                    FailureClass::StorageRootUnavailable,
                    &format!("cannot list chat session store {}: {e}", root.display()),
                );
                return;
            }
        };

        for workspace in workspaces.flatten() {
            let workspace_id = workspace.file_name().to_string_lossy().to_string();
            let chat_dir = workspace.path().join(CHAT_SESSIONS_DIR);
            if !chat_dir.is_dir() {
                continue;
            }
            let files = match std::fs::read_dir(&chat_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("cannot list {}: {e}", chat_dir.display());
                    continue;
                }
            };
            for file in files.flatten() {
                let path = file.path();
                match std::fs::read(&path) {
                    Ok(raw) => {
                        handle(normalize(&raw, &workspace_id, &path, &self.config));
                    }
                    Err(e) => {
                        tracing::warn!("failed to read chat session {}: {e}", path.display());
                        self.advisories.warn_once(
                            self.notifier.as_ref(),
                            FailureClass::SessionUnreadable,
                            &format!("failed to read chat session {}: {e}", path.display()),
                        );
                    }
                }
            }
        }
    }
}

/// Resolve the storage root: explicit override first, else the platform
/// config location (`%APPDATA%` / `~/.config`) under the editor's
/// `Code/User/workspaceStorage` layout.
pub fn resolve_root(config: &Config) -> Option<PathBuf> {
    if let Some(root) = &config.storage_root {
        return Some(root.clone());
    }
    dirs::config_dir().map(|dir| dir.join("Code").join("User").join("workspaceStorage"))
}
