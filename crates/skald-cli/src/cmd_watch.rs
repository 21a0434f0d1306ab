use skald_core::{Config, ConsoleNotifier, Notify};
use skald_log::{ActivityLog, SkaldPaths};
use skald_watch::{EditWatcher, InteractionDetector, NotificationAggregator};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long one loop turn blocks for edit events. Short enough to stay
/// responsive to Ctrl-C and to pending aggregator deadlines.
const TICK: Duration = Duration::from_millis(500);

pub fn execute(base: &Path, watch_path: &Path) -> anyhow::Result<()> {
    let paths = SkaldPaths::discover(base.to_path_buf());
    let config = Config::load(&paths.config_json);
    let notifier: Arc<dyn Notify> = Arc::new(ConsoleNotifier);

    let mut log = ActivityLog::new(paths, notifier.clone());
    log.ensure_resources();
    log.append("skald activated.");

    let detector = InteractionDetector::new(&config);
    let mut aggregator = NotificationAggregator::new(
        Duration::from_millis(config.debounce_ms),
        config.aggregate_capacity,
    );
    let mut watcher = EditWatcher::watch(watch_path)?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    eprintln!(
        "skald watch: {} (keyword \"{}\")",
        watch_path.display(),
        config.keyword
    );
    eprintln!("Press Ctrl-C to stop.\n");

    while running.load(Ordering::SeqCst) {
        let timeout = aggregator
            .deadline()
            .map(|d| d.saturating_duration_since(Instant::now()).min(TICK))
            .unwrap_or(TICK);

        if let Some(delta) = watcher.next_delta(timeout) {
            if let Some(snippet) = detector.inspect(&delta.text) {
                // Every detection is logged immediately; only the user
                // notification is debounced.
                log.append(&format!("Detected assistant interaction: {snippet}"));
                println!("[{}] {snippet}", skald_core::now_rfc3339());
                aggregator.enqueue(snippet, Instant::now());
            }
        }

        if let Some(aggregate) = aggregator.poll(Instant::now()) {
            notifier.info(&format!("Assistant activity detected:\n{aggregate}"));
        }
    }

    // Watcher subscription and any pending flush end here with their owners.
    Ok(())
}
