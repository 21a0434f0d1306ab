use skald_core::ConsoleNotifier;
use skald_log::{ActivityLog, SkaldPaths};
use std::path::Path;
use std::sync::Arc;

pub fn execute(base: &Path, limit: usize) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(base.to_path_buf());
    let log = ActivityLog::new(paths, Arc::new(ConsoleNotifier));

    let lines = log.head_lines(limit);
    if lines.is_empty() {
        println!("No entries in {}", log.paths.log_file.display());
        return Ok(());
    }
    for line in &lines {
        println!("{line}");
    }
    println!("\n({} lines shown)", lines.len());
    Ok(())
}
