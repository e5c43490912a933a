//! Durable stores: two independent JSON array slots plus change events.
//!
//! Persistence is deliberately simple — load the whole slot at startup,
//! rewrite it after every mutation. Single process, single writer; two
//! processes sharing a data directory race on the slot files.

pub mod journal;
pub mod labs;

pub use journal::SymptomJournal;
pub use labs::{ChartData, ChartSeries, LabStore};

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// A mutation that completed and persisted. Presentation layers subscribe
/// instead of the data core probing for UI refresh hooks.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    LabAdded { date: chrono::NaiveDate },
    SymptomAdded { id: uuid::Uuid },
    SymptomDeleted { id: uuid::Uuid },
}

/// Registered change listeners for one store.
#[derive(Default)]
pub(crate) struct Subscribers {
    listeners: Vec<Box<dyn Fn(&StoreEvent) + Send>>,
}

impl Subscribers {
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StoreEvent) + Send>) {
        self.listeners.push(listener);
    }

    pub fn notify(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

/// Read a JSON array slot. Missing file or unparsable content is not an
/// error — the caller falls back to its default dataset.
pub(crate) fn read_slot<T: DeserializeOwned>(path: &Path) -> Option<Vec<T>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("slot {} not readable: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::warn!("slot {} corrupt, using defaults: {e}", path.display());
            None
        }
    }
}

/// Rewrite a JSON array slot whole, creating parent directories on first use.
pub(crate) fn write_slot<T: Serialize>(path: &Path, entries: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(entries)?;
    std::fs::write(path, json)?;
    Ok(())
}
