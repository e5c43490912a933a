//! Rule evaluation for a newly recorded panel.
//!
//! Pure functions over the typed panel history: classify each present
//! measurement against its reference range, bucket findings, compute
//! per-analyte trends, and derive targeted recommendations plus the
//! Free Kappa trajectory against the baseline panel. Never fails — every
//! branch degrades to omitting a message.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AbnormalFlag, Analyte, LabEntry, Trend};
use crate::ranges::reference_range;

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

/// Percent-change band inside which a trend counts as stable.
const TREND_STABLE_BAND_PCT: f64 = 5.0;

/// Week label identifying the baseline panel for trajectory math.
const BASELINE_WEEK: &str = "Baseline";

/// Free Kappa reduction from baseline that counts as an excellent response.
const KAPPA_EXCELLENT_REDUCTION_PCT: f64 = 50.0;

/// Recommendation thresholds on raw measurement values.
const SODIUM_HYDRATION_BELOW: f64 = 135.0;
const ANC_NEUTROPENIA_BELOW: f64 = 1.5;
const PLATELETS_BLEEDING_BELOW: f64 = 100.0;
const HEMOGLOBIN_FATIGUE_BELOW: f64 = 10.0;
const EGFR_EXCELLENT_AT: f64 = 90.0;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Direction of one analyte across its two most recent observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReading {
    pub analyte: Analyte,
    pub trend: Trend,
    /// Percent change from the previous observation; 0 when fewer than two
    /// observations exist.
    pub change_pct: f64,
}

/// Derived analysis of one panel. Produced fresh on every insertion, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub date: NaiveDate,
    pub week: String,
    pub summary: Vec<String>,
    pub concerns: Vec<String>,
    pub positives: Vec<String>,
    pub recommendations: Vec<String>,
    /// One reading per analyte present on the panel, in canonical order.
    /// Consumed by the chart layer; not folded into the buckets above.
    pub trends: Vec<TrendReading>,
}

// ═══════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════

/// Classify a present measurement against its reference range.
/// Bounds are inclusive on both ends.
pub fn classify(value: f64, analyte: Analyte) -> AbnormalFlag {
    let range = reference_range(analyte);
    if value < range.min {
        AbnormalFlag::Low
    } else if value > range.max {
        AbnormalFlag::High
    } else {
        AbnormalFlag::Normal
    }
}

/// Trend of one analyte over a date-ordered history: the two most recent
/// panels carrying the analyte, compared as percent change.
pub fn trend_of(history: &[LabEntry], analyte: Analyte) -> TrendReading {
    let values: Vec<f64> = history.iter().filter_map(|l| l.value(analyte)).collect();
    if values.len() < 2 {
        return TrendReading { analyte, trend: Trend::Stable, change_pct: 0.0 };
    }
    let previous = values[values.len() - 2];
    let latest = values[values.len() - 1];
    if previous == 0.0 {
        // No meaningful percent change from a zero observation.
        return TrendReading { analyte, trend: Trend::Stable, change_pct: 0.0 };
    }
    let change_pct = (latest - previous) / previous * 100.0;
    let trend = if change_pct.abs() < TREND_STABLE_BAND_PCT {
        Trend::Stable
    } else if change_pct > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    };
    TrendReading { analyte, trend, change_pct }
}

// ═══════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════

/// Evaluate a newly recorded panel against the full history.
///
/// `history` is the store's contents after insertion, sorted ascending by
/// date (so the baseline panel and trend windows include the new entry).
pub fn evaluate(entry: &LabEntry, history: &[LabEntry]) -> AnalysisResult {
    let mut analysis = AnalysisResult {
        date: entry.date,
        week: entry.week.clone(),
        summary: Vec::new(),
        concerns: Vec::new(),
        positives: Vec::new(),
        recommendations: Vec::new(),
        trends: Vec::new(),
    };

    // Bucket each present measurement, canonical analyte order.
    for analyte in Analyte::ALL {
        let Some(value) = entry.value(analyte) else {
            continue;
        };
        let range = reference_range(analyte);
        match classify(value, analyte) {
            AbnormalFlag::Low => analysis.concerns.push(format!(
                "{}: {} {} (Low - below {})",
                range.name, value, range.unit, range.min
            )),
            AbnormalFlag::High => analysis.concerns.push(format!(
                "{}: {} {} (High - above {})",
                range.name, value, range.unit, range.max
            )),
            AbnormalFlag::Normal => analysis
                .positives
                .push(format!("{}: {} {} ✓", range.name, value, range.unit)),
        }
        analysis.trends.push(trend_of(history, analyte));
    }

    // Overall summary tier from the concern count.
    match analysis.concerns.len() {
        0 => analysis
            .summary
            .push("🎉 Excellent! All values within normal range.".into()),
        n @ 1..=2 => analysis
            .summary
            .push(format!("⚠️ Minor concerns ({n}). Most values normal.")),
        _ => analysis
            .summary
            .push("⚠️ Multiple values outside range. Discuss with your oncologist.".into()),
    }

    // Targeted recommendations on raw values, independent of the buckets.
    if entry.sodium.is_some_and(|v| v < SODIUM_HYDRATION_BELOW) {
        analysis.recommendations.push(
            "💧 Low sodium detected - increase fluid intake and discuss electrolyte supplements."
                .into(),
        );
    }
    if entry.anc.is_some_and(|v| v < ANC_NEUTROPENIA_BELOW) {
        analysis.recommendations.push(
            "🔴 Low neutrophils (ANC) - avoid crowds, report any fever immediately.".into(),
        );
    }
    if entry.platelets.is_some_and(|v| v < PLATELETS_BLEEDING_BELOW) {
        analysis.recommendations.push(
            "🩸 Low platelets - avoid injury, watch for unusual bruising/bleeding.".into(),
        );
    }
    if entry.hemoglobin.is_some_and(|v| v < HEMOGLOBIN_FATIGUE_BELOW) {
        analysis.recommendations.push(
            "😴 Low hemoglobin - you may feel fatigued, consider iron-rich foods.".into(),
        );
    }
    // Appended on top of the bucket entry: a normal eGFR in this band yields
    // two positive messages from one field.
    if entry.egfr.is_some_and(|v| v >= EGFR_EXCELLENT_AT) {
        analysis.positives.push("🏆 Kidney function excellent!".into());
    }

    // Disease-marker trajectory against the baseline panel.
    if let Some(kappa) = entry.free_kappa {
        let baseline_kappa = history
            .iter()
            .find(|l| l.week == BASELINE_WEEK)
            .and_then(|l| l.free_kappa)
            .filter(|&v| v > 0.0);
        if let Some(baseline) = baseline_kappa {
            let reduction = (baseline - kappa) / baseline * 100.0;
            if reduction >= KAPPA_EXCELLENT_REDUCTION_PCT {
                analysis.positives.push(format!(
                    "🎯 Free Kappa reduced by {reduction:.1}% from baseline - EXCELLENT RESPONSE!"
                ));
            } else if reduction > 0.0 {
                analysis.summary.push(format!(
                    "📉 Free Kappa reduced {reduction:.1}% - trending in right direction."
                ));
            }
        }
    }

    analysis
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
