pub mod analysis;
pub mod config;
pub mod models;
pub mod ranges;
pub mod store;

pub use analysis::{classify, evaluate, AnalysisResult, TrendReading};
pub use models::{AbnormalFlag, Analyte, EntryKind, LabDraft, LabEntry, SymptomDraft, SymptomEntry, Trend};
pub use ranges::{reference_range, ReferenceRange};
pub use store::{LabStore, StoreError, StoreEvent, SymptomJournal};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Call once from the embedding
/// shell before opening any store.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
