//! Save snapshots and the sinks they are written to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deep copy of the form value at the moment of saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    /// Form validity when the snapshot was taken
    pub valid: bool,
    pub value: serde_json::Value,
}

impl SaveRecord {
    pub fn new(value: serde_json::Value, valid: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            valid,
            value,
        }
    }

    /// Serialized value, as written to the log
    pub fn render(&self, pretty: bool) -> String {
        if pretty {
            format!("{:#}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

/// Destination for save snapshots.
///
/// Writing must not block and has no failure path visible to the form.
#[cfg_attr(test, mockall::automock)]
pub trait SaveSink: Send {
    fn write(&mut self, record: &SaveRecord);
}

/// Writes snapshots to the tracing log
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    pretty: bool,
}

impl LogSink {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl SaveSink for LogSink {
    fn write(&mut self, record: &SaveRecord) {
        tracing::info!(
            id = %record.id,
            saved_at = %record.saved_at.to_rfc3339(),
            valid = record.valid,
            "Saved: {}",
            record.render(self.pretty)
        );
    }
}
