use std::path::PathBuf;

const LOG_FILE_NAME: &str = "assistant-activity.log";
const CONFIG_FILE_NAME: &str = "config.json";

/// All well-known paths under the skald base directory.
#[derive(Debug, Clone)]
pub struct SkaldPaths {
    pub root: PathBuf,
    pub logs_dir: PathBuf,
    pub log_file: PathBuf,
    pub config_json: PathBuf,
}

impl SkaldPaths {
    /// Derive all paths from a base directory. Pure computation, no I/O.
    pub fn discover(base: impl Into<PathBuf>) -> Self {
        let root = base.into();
        let logs_dir = root.join("logs");
        Self {
            log_file: logs_dir.join(LOG_FILE_NAME),
            config_json: root.join(CONFIG_FILE_NAME),
            logs_dir,
            root,
        }
    }

    /// Default base directory: the current workspace if one is available,
    /// otherwise a per-user `~/.skald/`.
    pub fn default_base() -> PathBuf {
        if let Ok(cwd) = std::env::current_dir() {
            return cwd.join(".skald");
        }
        if let Some(home) = dirs::home_dir() {
            return home.join(".skald");
        }
        PathBuf::from(".skald")
    }

    /// Create the directory layout. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.logs_dir)?;
        Ok(())
    }

    /// Check whether the logs directory exists.
    pub fn is_initialized(&self) -> bool {
        self.logs_dir.is_dir()
    }

    /// Check whether the log file itself exists.
    pub fn log_file_exists(&self) -> bool {
        self.log_file.is_file()
    }
}
