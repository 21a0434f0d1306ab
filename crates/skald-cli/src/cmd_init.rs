use skald_core::ConsoleNotifier;
use skald_log::{ActivityLog, SkaldPaths};
use std::path::Path;
use std::sync::Arc;

pub fn execute(base: &Path) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(base.to_path_buf());
    let already = paths.is_initialized() && paths.log_file_exists();

    let mut log = ActivityLog::new(paths, Arc::new(ConsoleNotifier));
    if !log.ensure_resources() {
        anyhow::bail!("could not create log resources under {}", base.display());
    }

    if already {
        println!("Already initialized at {}", log.paths.logs_dir.display());
    } else {
        println!("Created log resources at {}", log.paths.logs_dir.display());
        println!("  {}", log.paths.log_file.display());
    }
    Ok(())
}
