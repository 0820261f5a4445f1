//! Policy record matching the MPF extract format

use serde::{Deserialize, Serialize};

/// One model point: a single policy in a single reporting period.
///
/// Numeric fields are optional because the extract leaves cells blank where a
/// value does not apply; blanks are skipped by every sum and mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Product variant code, e.g. C_IL_S
    #[serde(rename = "SOURCE")]
    pub source: String,

    /// Raw period identifier containing the numeric period code
    #[serde(rename = "Period")]
    pub period: String,

    /// Policy code
    #[serde(rename = "SPCODE", default)]
    pub spcode: String,

    /// Single premium paid at inception
    #[serde(rename = "PREM_SINGLE")]
    pub prem_single: Option<f64>,

    /// Annual annuity amount
    #[serde(rename = "ANNUITY_ANNUAL")]
    pub annuity_annual: Option<f64>,

    #[serde(rename = "AGE_AT_ENTRY")]
    pub age_at_entry: Option<f64>,

    /// Duration in force, months
    #[serde(rename = "DURATION_IF_M")]
    pub duration_if_m: Option<f64>,

    /// Renewal expense per policy
    #[serde(rename = "ANNUITY_EXPENSE_REN")]
    pub annuity_expense_ren: Option<f64>,

    /// Month of the year in which the annuity escalates
    #[serde(rename = "ANNUITY_ESC_MONTH")]
    pub annuity_esc_month: Option<f64>,

    /// Escalation percentage (zero for level annuities)
    #[serde(rename = "ANNUITY_ESC_PC")]
    pub annuity_esc_pc: Option<f64>,
}

impl PolicyRecord {
    /// Record with only the identifying fields set, everything else blank
    pub fn new(source: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            period: period.into(),
            spcode: String::new(),
            prem_single: None,
            annuity_annual: None,
            age_at_entry: None,
            duration_if_m: None,
            annuity_expense_ren: None,
            annuity_esc_month: None,
            annuity_esc_pc: None,
        }
    }
}
