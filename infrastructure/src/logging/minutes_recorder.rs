//! JSONL file writer for council events.
//!
//! Each event is serialized as a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use conclave_application::DebateObserver;
use conclave_domain::{DebateState, MinutesEntry};
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Council observer that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlMinutesRecorder {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlMinutesRecorder {
    /// Create a new recorder writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create minutes directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create minutes file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, record: Value) {
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // one flush per line
            let _ = writer.flush();
        }
    }

    fn now() -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

impl DebateObserver for JsonlMinutesRecorder {
    fn on_minutes(&self, entry: &MinutesEntry) {
        self.write(json!({
            "type": "minutes",
            "timestamp": entry.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "actor": entry.actor,
            "message": entry.message,
        }));
    }

    fn on_state_change(&self, state: DebateState, members: usize) {
        self.write(json!({
            "type": "state_change",
            "timestamp": Self::now(),
            "state": state,
            "tasks": members,
        }));
    }

    fn on_member_complete(&self, state: DebateState, member: &str, success: bool) {
        self.write(json!({
            "type": "member_complete",
            "timestamp": Self::now(),
            "state": state,
            "member": member,
            "success": success,
        }));
    }
}

impl Drop for JsonlMinutesRecorder {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
