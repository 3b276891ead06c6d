//! Per-invocation JSONL logging.
//!
//! One entry per completed command, appended best-effort: logging must
//! never fail the command it describes.
//!
//! Log file discovery chain:
//! 1. `$STEMLIFE_LOG_FILE` (explicit override)
//! 2. `$XDG_STATE_HOME/stemlife/ctl.jsonl`
//! 3. `$HOME/.local/state/stemlife/ctl.jsonl`

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub ts: String,

    /// Session ID for this invocation
    pub session_id: Uuid,

    /// Command name
    pub command: String,

    /// Success flag
    pub ok: bool,

    /// Error details if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl LogEntry {
    pub fn new(
        session_id: Uuid,
        command: &str,
        ok: bool,
        detail: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            ts: Utc::now().to_rfc3339(),
            session_id,
            command: command.to_string(),
            ok,
            detail,
            duration_ms,
        }
    }

    fn discover_log_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("STEMLIFE_LOG_FILE") {
            return Some(PathBuf::from(path));
        }
        if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
            return Some(PathBuf::from(xdg_state).join("stemlife/ctl.jsonl"));
        }
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".local/state/stemlife/ctl.jsonl"));
        }
        None
    }

    /// Append to the discovered log file. Best-effort: all failures are
    /// swallowed.
    pub fn append(&self) {
        let Some(path) = Self::discover_log_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let Ok(line) = serde_json::to_string(self) else {
            return;
        };
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = writeln!(file, "{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_append_as_one_json_line_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctl.jsonl");
        std::env::set_var("STEMLIFE_LOG_FILE", &path);

        let id = Uuid::new_v4();
        LogEntry::new(id, "event", true, None, 12).append();
        LogEntry::new(id, "choose", false, Some("network failure".into()), 40).append();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: LogEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.command, "event");
        assert!(first.ok);
        assert!(first.detail.is_none());

        let second: LogEntry = serde_json::from_str(lines[1]).unwrap();
        assert!(!second.ok);
        assert_eq!(second.detail.as_deref(), Some("network failure"));

        std::env::remove_var("STEMLIFE_LOG_FILE");
    }
}
