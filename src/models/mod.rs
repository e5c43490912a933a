pub mod enums;
pub mod lab;
pub mod symptom;

pub use enums::{AbnormalFlag, EntryKind, Trend};
pub use lab::{Analyte, LabDraft, LabEntry};
pub use symptom::{SymptomDraft, SymptomEntry};
