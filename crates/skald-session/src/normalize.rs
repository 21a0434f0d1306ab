use skald_core::Config;
use std::path::Path;

/// Title extraction order: top-level keys first, then `metadata.title`.
/// First non-empty match wins.
pub const TITLE_KEYS: [&str; 2] = ["title", "customTitle"];

/// Message list extraction order. First key holding a non-empty array wins.
pub const MESSAGE_LIST_KEYS: [&str; 2] = ["messages", "items"];

/// Workspace-path hint extraction order.
pub const WORKSPACE_PATH_KEYS: [&str; 3] = ["workspaceFolder", "folderUri", "cwd"];

/// One chat-session file reduced to the fixed shape the log consumes.
/// Ephemeral — only the rendered text form is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSession {
    /// Never empty: explicit title, else first-message prefix, else the
    /// source file name.
    pub title: String,
    pub workspace_id: String,
    pub resolved_path: Option<String>,
    pub source_path: String,
    /// Original file order, capped in count and per-message length.
    pub messages: Vec<String>,
}

/// Reduce raw session-file bytes to a [`NormalizedSession`].
///
/// Total over arbitrary input: malformed bytes degrade to a freeform
/// line-split record instead of failing the scan. Structured input is a
/// JSON object probed under the documented alternative keys; anything
/// else (non-JSON, non-object JSON) is treated as newline-delimited text.
pub fn normalize(
    raw: &[u8],
    workspace_id: &str,
    source_path: &Path,
    config: &Config,
) -> NormalizedSession {
    let text = String::from_utf8_lossy(raw);

    let (explicit_title, mut messages, resolved_path) =
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(obj)) => extract_structured(&obj),
            _ => (None, freeform_messages(&text, config.max_messages), None),
        };

    messages.truncate(config.max_messages);
    for message in &mut messages {
        *message = clip(message, config.message_max_len);
    }

    let title = explicit_title
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.trim().to_string())
        .or_else(|| {
            messages
                .first()
                .filter(|m| !m.trim().is_empty())
                .map(|m| clip(m.trim(), config.title_max_len))
        })
        .unwrap_or_else(|| file_name_of(source_path));

    NormalizedSession {
        title,
        workspace_id: workspace_id.to_string(),
        resolved_path,
        source_path: source_path.display().to_string(),
        messages,
    }
}

/// Render the fixed labelled block consumed by the log writer.
pub fn render(session: &NormalizedSession) -> String {
    let mut out = String::new();
    out.push_str(&format!("Imported chat session: {}\n", session.title));
    out.push_str(&format!("Workspace: {}\n", session.workspace_id));
    if let Some(path) = &session.resolved_path {
        out.push_str(&format!("Workspace path: {path}\n"));
    }
    out.push_str(&format!("Source: {}\n", session.source_path));
    out.push_str("Messages:");
    for (i, message) in session.messages.iter().enumerate() {
        out.push_str(&format!("\n  {}. {message}", i + 1));
    }
    out
}

fn extract_structured(
    obj: &serde_json::Map<String, serde_json::Value>,
) -> (Option<String>, Vec<String>, Option<String>) {
    let title = TITLE_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .or_else(|| {
            obj.get("metadata")
                .and_then(|m| m.get("title"))
                .and_then(|v| v.as_str())
        })
        .map(str::to_string);

    let messages = MESSAGE_LIST_KEYS
        .iter()
        .find_map(|key| {
            obj.get(*key)
                .and_then(|v| v.as_array())
                .filter(|items| !items.is_empty())
        })
        .map(|items| items.iter().map(message_text).collect())
        .unwrap_or_default();

    let resolved_path = WORKSPACE_PATH_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string);

    (title, messages, resolved_path)
}

/// A message item tolerates three shapes: a plain string, an object with
/// a `text` or `content` field, or anything else (stringified).
fn message_text(item: &serde_json::Value) -> String {
    if let Some(s) = item.as_str() {
        return s.to_string();
    }
    for key in ["text", "content"] {
        if let Some(field) = item.get(key) {
            if let Some(s) = field.as_str() {
                return s.to_string();
            }
            return field.to_string();
        }
    }
    item.to_string()
}

fn freeform_messages(text: &str, max: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(max)
        .map(str::to_string)
        .collect()
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    fn run(raw: &[u8]) -> NormalizedSession {
        normalize(raw, "ws-1", Path::new("/store/ws-1/chatSessions/chat.json"), &config())
    }

    #[test]
    fn well_formed_input_round_trips() {
        let session = run(br#"{"title": "T", "messages": ["a", "b"]}"#);
        assert_eq!(session.title, "T");
        assert_eq!(session.messages, vec!["a", "b"]);
        assert_eq!(session.workspace_id, "ws-1");
        assert!(session.resolved_path.is_none());
    }

    #[test]
    fn title_falls_back_to_first_message_prefix() {
        let session = run(br#"{"messages": ["hello world"]}"#);
        assert!("hello world".starts_with(&session.title));
        assert_eq!(session.title, "hello world");
    }

    #[test]
    fn long_first_message_title_is_truncated() {
        let long = "x".repeat(500);
        let raw = format!(r#"{{"messages": ["{long}"]}}"#);
        let session = run(raw.as_bytes());
        assert_eq!(session.title.chars().count(), config().title_max_len);
    }

    #[test]
    fn title_falls_back_to_file_name_when_empty() {
        let session = run(b"");
        assert_eq!(session.title, "chat.json");
        assert!(session.messages.is_empty());
    }

    #[test]
    fn whitespace_only_input_behaves_like_empty() {
        let session = run(b"  \n\t \n  ");
        assert_eq!(session.title, "chat.json");
        assert!(session.messages.is_empty());
    }

    #[test]
    fn total_over_garbage_bytes() {
        let session = run(&[0xff, 0xfe, 0x00, 0x80, b'\n', 0xc3]);
        assert!(!session.title.is_empty());
    }

    #[test]
    fn title_key_priority_is_fixed() {
        let session = run(br#"{"customTitle": "C", "metadata": {"title": "M"}}"#);
        assert_eq!(session.title, "C");
        let session = run(br#"{"metadata": {"title": "M"}}"#);
        assert_eq!(session.title, "M");
        let session = run(br#"{"title": "T", "customTitle": "C"}"#);
        assert_eq!(session.title, "T");
    }

    #[test]
    fn items_list_is_the_second_choice() {
        let session = run(br#"{"items": ["from items"]}"#);
        assert_eq!(session.messages, vec!["from items"]);
        let session = run(br#"{"messages": ["from messages"], "items": ["ignored"]}"#);
        assert_eq!(session.messages, vec!["from messages"]);
    }

    #[test]
    fn empty_messages_list_falls_through_to_items() {
        let session = run(br#"{"messages": [], "items": ["from items"]}"#);
        assert_eq!(session.messages, vec!["from items"]);
        // Both empty: zero messages, not an error.
        let session = run(br#"{"messages": [], "items": []}"#);
        assert!(session.messages.is_empty());
        assert_eq!(session.title, "chat.json");
    }

    #[test]
    fn message_items_tolerate_object_shapes() {
        let session = run(
            br#"{"messages": ["plain", {"text": "from text"}, {"content": "from content"}, {"content": {"k": 1}}, 42]}"#,
        );
        assert_eq!(session.messages[0], "plain");
        assert_eq!(session.messages[1], "from text");
        assert_eq!(session.messages[2], "from content");
        assert_eq!(session.messages[3], r#"{"k":1}"#);
        assert_eq!(session.messages[4], "42");
    }

    #[test]
    fn workspace_path_keys_probed_in_order() {
        let session = run(br#"{"folderUri": "file:///a", "cwd": "/b"}"#);
        assert_eq!(session.resolved_path.as_deref(), Some("file:///a"));
        let session = run(br#"{"workspaceFolder": "/w", "cwd": "/b"}"#);
        assert_eq!(session.resolved_path.as_deref(), Some("/w"));
    }

    #[test]
    fn freeform_input_splits_on_lines() {
        let session = run(b"first line\n\n  second line  \nthird");
        assert_eq!(session.messages, vec!["first line", "second line", "third"]);
        assert_eq!(session.title, "first line");
    }

    #[test]
    fn non_object_json_is_treated_as_freeform() {
        let session = run(b"[1, 2, 3]");
        assert_eq!(session.messages, vec!["[1, 2, 3]"]);
    }

    #[test]
    fn caps_bound_count_and_length() {
        let mut config = config();
        config.max_messages = 2;
        config.message_max_len = 4;
        let session = normalize(
            br#"{"messages": ["abcdefgh", "second", "dropped"]}"#,
            "ws",
            Path::new("s.json"),
            &config,
        );
        assert_eq!(session.messages, vec!["abcd", "seco"]);
    }

    #[test]
    fn render_has_fixed_labelled_lines() {
        let session = NormalizedSession {
            title: "T".into(),
            workspace_id: "ws".into(),
            resolved_path: Some("/w".into()),
            source_path: "/s/chat.json".into(),
            messages: vec!["a".into(), "b".into()],
        };
        let block = render(&session);
        assert_eq!(
            block,
            "Imported chat session: T\nWorkspace: ws\nWorkspace path: /w\nSource: /s/chat.json\nMessages:\n  1. a\n  2. b"
        );
    }

    #[test]
    fn render_omits_absent_workspace_path() {
        let session = run(br#"{"title": "T"}"#);
        let block = render(&session);
        assert!(!block.contains("Workspace path:"));
        assert!(block.ends_with("Messages:"));
    }
}
