//! Per-source, per-period summary of the model point extract

mod aggregate;
mod metric;

pub use aggregate::{extract_period_code, summarize, translate_period};
pub use metric::Metric;

use serde::{Deserialize, Serialize};

/// Summary statistics for one (source, period) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "SOURCE")]
    pub source: String,

    /// Reporting label, e.g. Jun24
    #[serde(rename = "Period")]
    pub period: String,

    /// Numeric period code the label was translated from
    #[serde(rename = "Period_Code")]
    pub period_code: u32,

    #[serde(rename = "Line_Counts")]
    pub line_counts: usize,

    #[serde(rename = "Total_Premiums")]
    pub total_premiums: f64,

    #[serde(rename = "Total_Annuity_Benefits")]
    pub total_annuity_benefits: f64,

    #[serde(rename = "Avg_Age_at_Entry")]
    pub avg_age_at_entry: Option<f64>,

    #[serde(rename = "Avg_Duration")]
    pub avg_duration: Option<f64>,

    #[serde(rename = "Avg_Ren_Exp_per_Policy")]
    pub avg_ren_exp_per_policy: Option<f64>,

    #[serde(rename = "Avg_Esc_Month")]
    pub avg_esc_month: Option<f64>,

    /// Mean over non-zero escalation percentages; `None` if the group has none
    #[serde(rename = "Avg_Esc_Perc_NPA")]
    pub avg_esc_perc_npa: Option<f64>,
}

impl SummaryRow {
    /// Value of a metric for this group, `None` when undefined
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::LineCounts => Some(self.line_counts as f64),
            Metric::TotalPremiums => Some(self.total_premiums),
            Metric::TotalAnnuityBenefits => Some(self.total_annuity_benefits),
            Metric::AvgAgeAtEntry => self.avg_age_at_entry,
            Metric::AvgDuration => self.avg_duration,
            Metric::AvgRenExpPerPolicy => self.avg_ren_exp_per_policy,
            Metric::AvgEscMonth => self.avg_esc_month,
            Metric::AvgEscPercNpa => self.avg_esc_perc_npa,
        }
    }
}

/// Aggregated summary, computed once per load and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(rows: Vec<SummaryRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row for a (source, period label) pair
    pub fn get(&self, source: &str, period: &str) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|r| r.source == source && r.period == period)
    }

    /// Distinct sources present, in row order
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !sources.contains(&row.source.as_str()) {
                sources.push(&row.source);
            }
        }
        sources
    }

    /// Rows whose source is in the given set
    pub fn for_sources<'a>(&'a self, sources: &'a [String]) -> impl Iterator<Item = &'a SummaryRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| sources.iter().any(|s| s == &r.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: &str, period: &str, code: u32, esc: Option<f64>) -> SummaryRow {
        SummaryRow {
            source: source.to_string(),
            period: period.to_string(),
            period_code: code,
            line_counts: 4,
            total_premiums: 1000.0,
            total_annuity_benefits: 100.0,
            avg_age_at_entry: Some(64.5),
            avg_duration: Some(30.0),
            avg_ren_exp_per_policy: Some(42.0),
            avg_esc_month: Some(6.0),
            avg_esc_perc_npa: esc,
        }
    }

    #[test]
    fn test_metric_values() {
        let r = row("C_NP_S", "Jun24", 5, None);
        assert_eq!(r.value(Metric::LineCounts), Some(4.0));
        assert_eq!(r.value(Metric::TotalPremiums), Some(1000.0));
        assert_eq!(r.value(Metric::AvgAgeAtEntry), Some(64.5));
        assert_eq!(r.value(Metric::AvgEscPercNpa), None);
    }

    #[test]
    fn test_for_sources() {
        let table = SummaryTable::new(vec![
            row("C_IL_S", "Jun24", 5, None),
            row("C_NP_S", "Jun24", 5, Some(3.0)),
            row("C_IL_S", "Dec23", 4, None),
        ]);

        let selected = vec!["C_IL_S".to_string()];
        assert_eq!(table.for_sources(&selected).count(), 2);
        assert_eq!(table.for_sources(&[]).count(), 0);
        assert_eq!(table.sources(), vec!["C_IL_S", "C_NP_S"]);
    }
}
