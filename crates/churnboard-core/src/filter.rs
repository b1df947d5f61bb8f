use crate::model::{CustomerRecord, Gender};

/// Sidebar-style subset selection applied before aggregation. Every criterion
/// is optional; `Default` is the pass-everything filter (the "reset" state).
/// Tenure bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub gender: Option<Gender>,
    pub paperless_billing: Option<bool>,
    pub phone_service: Option<bool>,
    pub dependents: Option<bool>,
    pub min_tenure_months: Option<u32>,
    pub max_tenure_months: Option<u32>,
}

impl RecordFilter {
    pub fn matches(&self, record: &CustomerRecord) -> bool {
        if let Some(gender) = self.gender {
            if record.gender != gender {
                return false;
            }
        }
        if let Some(paperless) = self.paperless_billing {
            if record.paperless_billing != paperless {
                return false;
            }
        }
        if let Some(phone) = self.phone_service {
            if record.phone_service != phone {
                return false;
            }
        }
        if let Some(dependents) = self.dependents {
            if record.dependents != dependents {
                return false;
            }
        }
        if let Some(min) = self.min_tenure_months {
            if record.tenure_months < min {
                return false;
            }
        }
        if let Some(max) = self.max_tenure_months {
            if record.tenure_months > max {
                return false;
            }
        }
        true
    }

    /// Produces a fresh owned collection; the source dataset stays untouched
    /// so a later refresh can re-filter from the full data.
    pub fn apply(&self, records: &[CustomerRecord]) -> Vec<CustomerRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}
