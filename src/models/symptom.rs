use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::EntryKind;

/// One stored journal entry. Newest entries sit at the front of the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Self-reported scales, 1-10. Supplied by the caller; the journal does
    /// not range-check them.
    pub fatigue: u8,
    pub nausea: u8,
    pub appetite: u8,
    pub pain: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Boundary input for recording a journal entry; id, timestamp, and date are
/// assigned at insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymptomDraft {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub fatigue: u8,
    pub nausea: u8,
    pub appetite: u8,
    pub pain: u8,
    #[serde(default)]
    pub notes: Option<String>,
}
