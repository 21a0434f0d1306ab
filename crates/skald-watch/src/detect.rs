use skald_core::Config;

/// Filters the live edit stream for assistant-related changes.
///
/// Pure and allocation-light: the relevance test is a single
/// case-insensitive substring check over the edit delta, so cost is
/// linear in the delta size regardless of document size.
#[derive(Debug, Clone)]
pub struct InteractionDetector {
    keyword: String,
    snippet_max_len: usize,
}

impl InteractionDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            keyword: config.keyword.to_lowercase(),
            snippet_max_len: config.snippet_max_len,
        }
    }

    /// Decide whether an edit delta is assistant-related. Non-matches
    /// return `None` with no side effect. A match yields a bounded,
    /// whitespace-normalized snippet: the caller logs it immediately and
    /// enqueues it for aggregation.
    pub fn inspect(&self, delta: &str) -> Option<String> {
        if delta.is_empty() {
            return None;
        }
        if !delta.to_lowercase().contains(&self.keyword) {
            return None;
        }
        let collapsed = delta.split_whitespace().collect::<Vec<_>>().join(" ");
        Some(collapsed.chars().take(self.snippet_max_len).collect())
    }
}
