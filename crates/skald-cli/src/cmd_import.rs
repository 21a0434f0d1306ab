use skald_core::{Config, ConsoleNotifier, Notify};
use skald_log::{ActivityLog, SkaldPaths};
use skald_session::SessionStore;
use std::path::Path;
use std::sync::Arc;

pub fn execute(base: &Path) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(base.to_path_buf());
    let config = Config::load(&paths.config_json);
    let notifier: Arc<dyn Notify> = Arc::new(ConsoleNotifier);

    let mut log = ActivityLog::new(paths, notifier.clone());
    log.ensure_resources();

    let mut store = SessionStore::new(config, notifier);
    let imported = store.scan_and_log(&mut log);

    if imported == 0 {
        println!("No chat sessions found.");
    } else {
        println!(
            "Imported {imported} chat session(s) into {}",
            log.paths.log_file.display()
        );
    }
    Ok(())
}
