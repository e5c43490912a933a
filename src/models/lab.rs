use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Every measurement key the tracker recognizes, in canonical panel order.
///
/// This order is load-bearing: analysis output (concerns, positives, trends)
/// lists findings in `Analyte::ALL` order, not the order a caller happened
/// to fill fields in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Analyte {
    Wbc,
    Hemoglobin,
    Platelets,
    Anc,
    Alc,
    Creatinine,
    Egfr,
    Calcium,
    Sodium,
    FreeKappa,
    MSpike,
}

impl Analyte {
    pub const ALL: [Analyte; 11] = [
        Analyte::Wbc,
        Analyte::Hemoglobin,
        Analyte::Platelets,
        Analyte::Anc,
        Analyte::Alc,
        Analyte::Creatinine,
        Analyte::Egfr,
        Analyte::Calcium,
        Analyte::Sodium,
        Analyte::FreeKappa,
        Analyte::MSpike,
    ];

    /// The JSON/slot key for this analyte.
    pub fn key(&self) -> &'static str {
        match self {
            Analyte::Wbc => "wbc",
            Analyte::Hemoglobin => "hemoglobin",
            Analyte::Platelets => "platelets",
            Analyte::Anc => "anc",
            Analyte::Alc => "alc",
            Analyte::Creatinine => "creatinine",
            Analyte::Egfr => "egfr",
            Analyte::Calcium => "calcium",
            Analyte::Sodium => "sodium",
            Analyte::FreeKappa => "freeKappa",
            Analyte::MSpike => "mSpike",
        }
    }

    /// Lookup by slot key. Unknown keys are not an error, just unrecognized.
    pub fn from_key(key: &str) -> Option<Analyte> {
        Analyte::ALL.iter().copied().find(|a| a.key() == key)
    }
}

/// One dated panel observation. Absent measurements are `None` and are
/// omitted from the slot JSON; a recorded zero is a present measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabEntry {
    pub date: NaiveDate,
    pub week: String,
    /// Creation instant, stamped at insertion. Seed rows predate stamping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wbc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platelets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creatinine: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egfr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_kappa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m_spike: Option<f64>,
}

impl LabEntry {
    /// Uniform accessor over the measurement fields.
    pub fn value(&self, analyte: Analyte) -> Option<f64> {
        match analyte {
            Analyte::Wbc => self.wbc,
            Analyte::Hemoglobin => self.hemoglobin,
            Analyte::Platelets => self.platelets,
            Analyte::Anc => self.anc,
            Analyte::Alc => self.alc,
            Analyte::Creatinine => self.creatinine,
            Analyte::Egfr => self.egfr,
            Analyte::Calcium => self.calcium,
            Analyte::Sodium => self.sodium,
            Analyte::FreeKappa => self.free_kappa,
            Analyte::MSpike => self.m_spike,
        }
    }
}

/// Boundary input for recording a new panel.
///
/// A closed schema: unrecognized measurement keys fail at parse time instead
/// of being spread into the stored record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabDraft {
    pub date: NaiveDate,
    /// Free-text label; defaults to "Week {n}" at insertion when omitted.
    #[serde(default)]
    pub week: Option<String>,
    #[serde(default)]
    pub wbc: Option<f64>,
    #[serde(default)]
    pub hemoglobin: Option<f64>,
    #[serde(default)]
    pub platelets: Option<f64>,
    #[serde(default)]
    pub anc: Option<f64>,
    #[serde(default)]
    pub alc: Option<f64>,
    #[serde(default)]
    pub creatinine: Option<f64>,
    #[serde(default)]
    pub egfr: Option<f64>,
    #[serde(default)]
    pub calcium: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub free_kappa: Option<f64>,
    #[serde(default)]
    pub m_spike: Option<f64>,
}
