//! Lab history store: ordered panel sequence in one durable JSON slot.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::analysis::{self, AnalysisResult, TrendReading};
use crate::config;
use crate::models::{Analyte, LabDraft, LabEntry};
use crate::ranges::reference_range;
use crate::store::{read_slot, write_slot, StoreError, StoreEvent, Subscribers};

/// Week labels plus one value series per requested analyte. Data only —
/// styling belongs to whatever renders it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// The ordered lab history, kept sorted ascending by date and rewritten to
/// its slot after every mutation. Construct once and pass by reference.
pub struct LabStore {
    path: PathBuf,
    entries: Vec<LabEntry>,
    subscribers: Subscribers,
}

impl LabStore {
    /// Open the store backed by the given slot path. A missing or corrupt
    /// slot falls back to the seed panel history, never an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = read_slot(&path).unwrap_or_else(|| {
            tracing::info!("lab slot {} empty, seeding history", path.display());
            seed_panels()
        });
        entries.sort_by_key(|e| e.date);
        Self { path, entries, subscribers: Subscribers::default() }
    }

    /// Open the store at the default slot under the app data directory.
    pub fn open_default() -> Self {
        Self::open(config::labs_path())
    }

    /// Register a change listener, notified after each persisted mutation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StoreEvent) + Send>) {
        self.subscribers.subscribe(listener);
    }

    /// Record a new panel: stamp the creation instant, default the week
    /// label, re-sort, persist, and return the fresh analysis.
    pub fn add(&mut self, draft: LabDraft) -> Result<AnalysisResult, StoreError> {
        let entry = LabEntry {
            date: draft.date,
            week: draft
                .week
                .unwrap_or_else(|| format!("Week {}", self.entries.len())),
            timestamp: Some(Utc::now()),
            wbc: draft.wbc,
            hemoglobin: draft.hemoglobin,
            platelets: draft.platelets,
            anc: draft.anc,
            alc: draft.alc,
            creatinine: draft.creatinine,
            egfr: draft.egfr,
            calcium: draft.calcium,
            sodium: draft.sodium,
            free_kappa: draft.free_kappa,
            m_spike: draft.m_spike,
        };

        self.entries.push(entry.clone());
        self.entries.sort_by_key(|e| e.date);
        write_slot(&self.path, &self.entries)?;

        tracing::debug!("recorded panel {} ({})", entry.date, entry.week);
        self.subscribers.notify(&StoreEvent::LabAdded { date: entry.date });

        Ok(analysis::evaluate(&entry, &self.entries))
    }

    /// The most recent panel by date, if any.
    pub fn latest(&self) -> Option<&LabEntry> {
        self.entries.last()
    }

    /// The full history, ascending by date.
    pub fn all(&self) -> &[LabEntry] {
        &self.entries
    }

    /// Trend of one analyte over the current history.
    pub fn trend_for(&self, analyte: Analyte) -> TrendReading {
        analysis::trend_of(&self.entries, analyte)
    }

    /// Week labels plus one series per requested analyte, aligned by panel.
    pub fn chart_series(&self, analytes: &[Analyte]) -> ChartData {
        ChartData {
            labels: self.entries.iter().map(|e| e.week.clone()).collect(),
            datasets: analytes
                .iter()
                .map(|&analyte| ChartSeries {
                    label: reference_range(analyte).name.to_string(),
                    data: self.entries.iter().map(|e| e.value(analyte)).collect(),
                })
                .collect(),
        }
    }

    /// The full history as CSV. Absent measurements are empty cells.
    pub fn export_csv(&self) -> String {
        let mut lines =
            vec!["Date,Week,WBC,Hgb,Plt,ANC,ALC,Creat,eGFR,Na,Ca,FreeKappa,M-Spike".to_string()];
        for e in &self.entries {
            let cells = [
                e.wbc, e.hemoglobin, e.platelets, e.anc, e.alc,
                e.creatinine, e.egfr, e.sodium, e.calcium, e.free_kappa, e.m_spike,
            ]
            .map(csv_cell);
            lines.push(format!("{},{},{}", e.date, e.week, cells.join(",")));
        }
        lines.join("\n")
    }
}

fn csv_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The fixed historical panels used when the slot is missing or corrupt.
fn seed_panels() -> Vec<LabEntry> {
    let blank = |date: &str, week: &str| LabEntry {
        date: date.parse().expect("seed date"),
        week: week.into(),
        timestamp: None,
        wbc: None,
        hemoglobin: None,
        platelets: None,
        anc: None,
        alc: None,
        creatinine: None,
        egfr: None,
        calcium: None,
        sodium: None,
        free_kappa: None,
        m_spike: None,
    };
    vec![
        LabEntry {
            wbc: Some(7.8),
            hemoglobin: Some(14.2),
            platelets: Some(245.0),
            free_kappa: Some(655.69),
            m_spike: Some(1.07),
            ..blank("2025-11-07", "Baseline")
        },
        LabEntry {
            wbc: Some(9.4),
            hemoglobin: Some(16.4),
            platelets: Some(293.0),
            anc: Some(5.3),
            alc: Some(3.1),
            ..blank("2025-12-26", "Day 5")
        },
        LabEntry {
            wbc: Some(7.2),
            hemoglobin: Some(15.3),
            platelets: Some(203.0),
            anc: Some(4.1),
            alc: Some(2.3),
            ..blank("2026-01-02", "Week 2")
        },
        LabEntry {
            wbc: Some(9.0),
            hemoglobin: Some(17.0),
            platelets: Some(241.0),
            anc: Some(6.2),
            alc: Some(2.0),
            creatinine: Some(0.78),
            egfr: Some(103.0),
            sodium: Some(134.0),
            calcium: Some(9.5),
            ..blank("2026-01-09", "Week 3")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn temp_store() -> (tempfile::TempDir, LabStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LabStore::open(dir.path().join("labs.json"));
        (dir, store)
    }

    fn draft(date: &str) -> LabDraft {
        LabDraft { date: date.parse().unwrap(), ..LabDraft::default() }
    }

    #[test]
    fn fresh_store_holds_seed_history() {
        let (_dir, store) = temp_store();
        assert_eq!(store.all().len(), 4);
        assert_eq!(store.all()[0].week, "Baseline");
        assert_eq!(store.all()[0].free_kappa, Some(655.69));
        assert_eq!(store.latest().unwrap().week, "Week 3");
    }

    #[test]
    fn corrupt_slot_falls_back_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labs.json");
        std::fs::write(&path, "[{\"date\": oops").unwrap();
        let store = LabStore::open(&path);
        assert_eq!(store.all().len(), 4);
    }

    #[test]
    fn add_keeps_history_sorted_by_date() {
        let (_dir, mut store) = temp_store();
        // Backdated between Day 5 and Week 2.
        store.add(draft("2025-12-30")).unwrap();
        store.add(draft("2026-02-01")).unwrap();
        let dates: Vec<_> = store.all().iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn add_defaults_week_from_history_length() {
        let (_dir, mut store) = temp_store();
        let analysis = store.add(draft("2026-01-16")).unwrap();
        assert_eq!(analysis.week, "Week 4");

        let analysis = store.add(draft("2026-01-23")).unwrap();
        assert_eq!(analysis.week, "Week 5");
    }

    #[test]
    fn add_stamps_timestamp_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labs.json");
        {
            let mut store = LabStore::open(&path);
            let mut d = draft("2026-01-16");
            d.wbc = Some(5.5);
            store.add(d).unwrap();
        }
        let reopened = LabStore::open(&path);
        assert_eq!(reopened.all().len(), 5);
        let added = reopened.latest().unwrap();
        assert!(added.timestamp.is_some());
        assert_eq!(added.wbc, Some(5.5));
    }

    #[test]
    fn add_analysis_sees_baseline_trajectory() {
        let (_dir, mut store) = temp_store();
        let mut d = draft("2026-01-16");
        d.free_kappa = Some(327.0);
        let analysis = store.add(d).unwrap();
        assert!(analysis
            .positives
            .iter()
            .any(|p| p.contains("EXCELLENT RESPONSE")));
    }

    #[test]
    fn add_notifies_subscribers_once() {
        let (_dir, mut store) = temp_store();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        store.subscribe(Box::new(move |event| {
            assert!(matches!(event, StoreEvent::LabAdded { .. }));
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        store.add(draft("2026-01-16")).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trend_for_reads_current_history() {
        let (_dir, store) = temp_store();
        // Seed WBC: ... 7.2 (Week 2), 9.0 (Week 3) -> +25%
        let reading = store.trend_for(Analyte::Wbc);
        assert_eq!(reading.trend, crate::models::Trend::Up);
    }

    #[test]
    fn chart_series_aligns_panels_and_gaps() {
        let (_dir, store) = temp_store();
        let chart = store.chart_series(&[Analyte::Wbc, Analyte::FreeKappa]);
        assert_eq!(chart.labels, vec!["Baseline", "Day 5", "Week 2", "Week 3"]);
        assert_eq!(chart.datasets[0].label, "WBC");
        assert_eq!(chart.datasets[0].data, vec![Some(7.8), Some(9.4), Some(7.2), Some(9.0)]);
        // Free Kappa only on the baseline panel.
        assert_eq!(chart.datasets[1].data, vec![Some(655.69), None, None, None]);
    }

    #[test]
    fn csv_has_fixed_columns_and_empty_absent_cells() {
        let (_dir, store) = temp_store();
        let csv = store.export_csv();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Week,WBC,Hgb,Plt,ANC,ALC,Creat,eGFR,Na,Ca,FreeKappa,M-Spike"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-11-07,Baseline,7.8,14.2,245,,,,,,,655.69,1.07"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-12-26,Day 5,9.4,16.4,293,5.3,3.1,,,,,,"
        );
    }
}
