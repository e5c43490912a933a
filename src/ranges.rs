//! Clinical reference ranges for every tracked analyte.
//!
//! Fixed table, immutable for the process lifetime. Bounds are inclusive:
//! a value equal to `min` or `max` is in range.

use crate::models::Analyte;

/// The clinically normal band for one measurement key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
    pub name: &'static str,
}

/// Look up the reference range for an analyte.
pub fn reference_range(analyte: Analyte) -> &'static ReferenceRange {
    match analyte {
        Analyte::Wbc => &ReferenceRange { min: 4.0, max: 11.0, unit: "K/μL", name: "WBC" },
        Analyte::Hemoglobin => &ReferenceRange { min: 13.5, max: 17.0, unit: "g/dL", name: "Hemoglobin" },
        Analyte::Platelets => &ReferenceRange { min: 130.0, max: 450.0, unit: "K/μL", name: "Platelets" },
        Analyte::Anc => &ReferenceRange { min: 1.5, max: 7.8, unit: "K/μL", name: "ANC" },
        Analyte::Alc => &ReferenceRange { min: 0.9, max: 3.9, unit: "K/μL", name: "ALC" },
        Analyte::Creatinine => &ReferenceRange { min: 0.68, max: 1.37, unit: "mg/dL", name: "Creatinine" },
        Analyte::Egfr => &ReferenceRange { min: 60.0, max: 150.0, unit: "mL/min", name: "eGFR" },
        Analyte::Calcium => &ReferenceRange { min: 8.7, max: 10.4, unit: "mg/dL", name: "Calcium" },
        Analyte::Sodium => &ReferenceRange { min: 135.0, max: 145.0, unit: "mmol/L", name: "Sodium" },
        Analyte::FreeKappa => &ReferenceRange { min: 0.33, max: 1.94, unit: "mg/L", name: "Free Kappa" },
        Analyte::MSpike => &ReferenceRange { min: 0.0, max: 0.3, unit: "g/dL", name: "M-Spike" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_analyte_has_a_range() {
        for analyte in Analyte::ALL {
            let range = reference_range(analyte);
            assert!(range.min <= range.max, "{} range inverted", range.name);
            assert!(!range.unit.is_empty());
        }
    }

    #[test]
    fn wbc_range_matches_panel() {
        let range = reference_range(Analyte::Wbc);
        assert_eq!((range.min, range.max), (4.0, 11.0));
        assert_eq!(range.unit, "K/μL");
    }

    #[test]
    fn m_spike_floor_is_zero() {
        let range = reference_range(Analyte::MSpike);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 0.3);
    }
}
