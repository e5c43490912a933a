//! Symptom journal: newest-first entry sequence in one durable JSON slot.
//!
//! Independent of the lab history — no cross-analysis. The opposite order
//! convention from `LabStore` (newest first) is the journal's display order.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::config;
use crate::models::{SymptomDraft, SymptomEntry};
use crate::store::{read_slot, write_slot, StoreError, StoreEvent, Subscribers};

pub struct SymptomJournal {
    path: PathBuf,
    entries: Vec<SymptomEntry>,
    subscribers: Subscribers,
}

impl SymptomJournal {
    /// Open the journal backed by the given slot path. Missing or corrupt
    /// slots start empty, never an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_slot(&path).unwrap_or_default();
        Self { path, entries, subscribers: Subscribers::default() }
    }

    /// Open the journal at the default slot under the app data directory.
    pub fn open_default() -> Self {
        Self::open(config::journal_path())
    }

    /// Register a change listener, notified after each persisted mutation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StoreEvent) + Send>) {
        self.subscribers.subscribe(listener);
    }

    /// Record an entry: assign id, timestamp, and today's date, then prepend.
    pub fn add(&mut self, draft: SymptomDraft) -> Result<SymptomEntry, StoreError> {
        let now = Utc::now();
        let entry = SymptomEntry {
            id: Uuid::new_v4(),
            timestamp: now,
            date: now.date_naive(),
            kind: draft.kind,
            fatigue: draft.fatigue,
            nausea: draft.nausea,
            appetite: draft.appetite,
            pain: draft.pain,
            notes: draft.notes,
        };

        self.entries.insert(0, entry.clone());
        write_slot(&self.path, &self.entries)?;

        tracing::debug!("recorded {} journal entry {}", entry.kind.as_str(), entry.id);
        self.subscribers.notify(&StoreEvent::SymptomAdded { id: entry.id });

        Ok(entry)
    }

    /// Remove an entry by id.
    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(StoreError::NotFound {
                entity_type: "SymptomEntry".into(),
                id: id.to_string(),
            });
        }
        write_slot(&self.path, &self.entries)?;
        self.subscribers.notify(&StoreEvent::SymptomDeleted { id });
        Ok(())
    }

    /// All entries, newest first.
    pub fn all(&self) -> &[SymptomEntry] {
        &self.entries
    }

    /// All entries as CSV, newest first. Notes are quoted; the numeric
    /// scales are bare.
    pub fn export_csv(&self) -> String {
        let mut lines = vec!["Date,Type,Fatigue,Nausea,Appetite,Pain,Notes".to_string()];
        for e in &self.entries {
            lines.push(format!(
                "{},{},{},{},{},{},\"{}\"",
                e.date,
                e.kind.as_str(),
                e.fatigue,
                e.nausea,
                e.appetite,
                e.pain,
                e.notes.as_deref().unwrap_or("")
            ));
        }
        lines.join("\n")
    }
}
