//! Summary metrics shown on the dashboard

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MpfError;

/// One summary statistic per (source, period) group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Line_Counts")]
    LineCounts,
    #[serde(rename = "Total_Premiums")]
    TotalPremiums,
    #[serde(rename = "Total_Annuity_Benefits")]
    TotalAnnuityBenefits,
    #[serde(rename = "Avg_Age_at_Entry")]
    AvgAgeAtEntry,
    #[serde(rename = "Avg_Duration")]
    AvgDuration,
    #[serde(rename = "Avg_Ren_Exp_per_Policy")]
    AvgRenExpPerPolicy,
    #[serde(rename = "Avg_Esc_Month")]
    AvgEscMonth,
    /// Mean escalation percentage over escalating policies only
    #[serde(rename = "Avg_Esc_Perc_NPA")]
    AvgEscPercNpa,
}

impl Metric {
    /// All metrics in dashboard display order
    pub const ALL: [Metric; 8] = [
        Metric::LineCounts,
        Metric::TotalPremiums,
        Metric::TotalAnnuityBenefits,
        Metric::AvgAgeAtEntry,
        Metric::AvgDuration,
        Metric::AvgRenExpPerPolicy,
        Metric::AvgEscMonth,
        Metric::AvgEscPercNpa,
    ];

    /// Column name in the summary table
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::LineCounts => "Line_Counts",
            Metric::TotalPremiums => "Total_Premiums",
            Metric::TotalAnnuityBenefits => "Total_Annuity_Benefits",
            Metric::AvgAgeAtEntry => "Avg_Age_at_Entry",
            Metric::AvgDuration => "Avg_Duration",
            Metric::AvgRenExpPerPolicy => "Avg_Ren_Exp_per_Policy",
            Metric::AvgEscMonth => "Avg_Esc_Month",
            Metric::AvgEscPercNpa => "Avg_Esc_Perc_NPA",
        }
    }

    /// Title of the time-series chart for this metric
    pub fn chart_title(&self) -> &'static str {
        match self {
            Metric::LineCounts => "Line Counts by Source Over Time",
            Metric::TotalPremiums => "Total Premiums by Source Over Time",
            Metric::TotalAnnuityBenefits => "Total Annuity Benefits by Source Over Time",
            Metric::AvgAgeAtEntry => "Average Age by Source Over Time",
            Metric::AvgDuration => "Average Duration by Source Over Time",
            Metric::AvgRenExpPerPolicy => "Average Renewal Expense per Policy by Source Over Time",
            Metric::AvgEscMonth => "Average Escalation Month by Source Over Time",
            Metric::AvgEscPercNpa => "Average Escalation Percentage Over Time (NPA)",
        }
    }

    /// Only meaningful for the non-profit annuity family
    pub fn is_escalation_only(&self) -> bool {
        matches!(self, Metric::AvgEscPercNpa)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Metric {
    type Err = MpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .find(|m| m.column_name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| MpfError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert_eq!("Total_Premiums".parse::<Metric>().unwrap(), Metric::TotalPremiums);
        assert_eq!("avg_esc_perc_npa".parse::<Metric>().unwrap(), Metric::AvgEscPercNpa);
        assert!("Total_Claims".parse::<Metric>().is_err());
    }

    #[test]
    fn test_only_npa_metric_is_escalation_only() {
        let escalation: Vec<_> = Metric::ALL.iter().filter(|m| m.is_escalation_only()).collect();
        assert_eq!(escalation, vec![&Metric::AvgEscPercNpa]);
    }
}
