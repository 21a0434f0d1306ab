use std::collections::HashSet;
use std::sync::Mutex;

// ── Notification sink ──

/// Abstract host notification surface (info/warning/error popups in the
/// editor, stderr lines in the CLI). Components hold a `&dyn Notify` and
/// never talk to a concrete host directly.
pub trait Notify {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Stderr-backed notifier for CLI use.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn info(&self, message: &str) {
        eprintln!("[skald] {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("[skald] warning: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("[skald] error: {message}");
    }
}

/// Recording notifier for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl MemoryNotifier {
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == Severity::Warn)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

impl Notify for MemoryNotifier {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}

// ── Warn-once advisories ──

/// Failure classes that surface to the user at most once per instance
/// lifetime. Repeats are demoted to trace logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    MissingDir,
    MissingFile,
    WriteFailed,
    StorageRootUnavailable,
    SessionUnreadable,
}

/// Per-instance advisory dedupe. Owned by whichever component emits the
/// advisories — there is deliberately no process-wide warned state.
#[derive(Debug, Default)]
pub struct Advisories {
    warned: HashSet<FailureClass>,
}

impl Advisories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface `message` through `sink` unless this failure class was
    /// already surfaced by this instance.
    pub fn warn_once(&mut self, sink: &dyn Notify, class: FailureClass, message: &str) {
        if self.warned.insert(class) {
            sink.warn(message);
        } else {
            tracing::debug!("suppressed repeat advisory ({class:?}): {message}");
        }
    }

    pub fn has_warned(&self, class: FailureClass) -> bool {
        self.warned.contains(&class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_once_suppresses_repeats() {
        let sink = MemoryNotifier::default();
        let mut advisories = Advisories::new();
        advisories.warn_once(&sink, FailureClass::MissingDir, "dir gone");
        advisories.warn_once(&sink, FailureClass::MissingDir, "dir gone again");
        assert_eq!(sink.warnings(), vec!["dir gone".to_string()]);
    }

    #[test]
    fn distinct_classes_each_surface() {
        let sink = MemoryNotifier::default();
        let mut advisories = Advisories::new();
        advisories.warn_once(&sink, FailureClass::MissingDir, "a");
        advisories.warn_once(&sink, FailureClass::WriteFailed, "b");
        assert_eq!(sink.warnings().len(), 2);
        assert!(advisories.has_warned(FailureClass::MissingDir));
        assert!(advisories.has_warned(FailureClass::WriteFailed));
        assert!(!advisories.has_warned(FailureClass::MissingFile));
    }

    #[test]
    fn instances_do_not_share_state() {
        let sink = MemoryNotifier::default();
        let mut a = Advisories::new();
        let mut b = Advisories::new();
        a.warn_once(&sink, FailureClass::WriteFailed, "from a");
        b.warn_once(&sink, FailureClass::WriteFailed, "from b");
        assert_eq!(sink.warnings().len(), 2);
    }
}
