//! Period code to reporting-date label table

use std::collections::BTreeMap;

use crate::error::{MpfError, Result};

/// Fixed lookup from the numeric period code carried in the MPF extract
/// to the semiannual reporting label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLabels {
    labels: BTreeMap<u32, String>,
}

impl PeriodLabels {
    /// Build from (code, label) pairs. Codes and labels must both be unique.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut labels = BTreeMap::new();

        for (code, label) in entries {
            let label = label.into();
            if labels.values().any(|existing| existing == &label) {
                return Err(MpfError::Mapping(format!("period label {} listed twice", label)));
            }
            if labels.insert(code, label).is_some() {
                return Err(MpfError::Mapping(format!("period code {} listed twice", code)));
            }
        }

        Ok(Self { labels })
    }

    /// Semiannual reporting dates from Jun22 (code 1) to Dec25 (code 8)
    pub fn semiannual_schedule() -> Self {
        let labels = [
            (1, "Jun22"),
            (2, "Dec22"),
            (3, "Jun23"),
            (4, "Dec23"),
            (5, "Jun24"),
            (6, "Dec24"),
            (7, "Jun25"),
            (8, "Dec25"),
        ]
        .into_iter()
        .map(|(code, label)| (code, label.to_string()))
        .collect();

        Self { labels }
    }

    pub fn label(&self, code: u32) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Reverse lookup, used to order chart points chronologically
    pub fn code_of(&self, label: &str) -> Option<u32> {
        self.labels
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(code, _)| *code)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.code_of(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self::semiannual_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semiannual_schedule() {
        let periods = PeriodLabels::default();
        assert_eq!(periods.len(), 8);
        assert_eq!(periods.label(5), Some("Jun24"));
        assert_eq!(periods.label(4), Some("Dec23"));
        assert_eq!(periods.label(9), None);
        assert_eq!(periods.code_of("Dec25"), Some(8));
        assert!(!periods.contains_label("Mar24"));
    }

    #[test]
    fn test_duplicate_entries_rejected() {
        assert!(PeriodLabels::new([(1, "Jun22"), (1, "Dec22")]).is_err());
        assert!(PeriodLabels::new([(1, "Jun22"), (2, "Jun22")]).is_err());
        assert!(PeriodLabels::new([(1, "Jun22"), (2, "Dec22")]).is_ok());
    }
}
