//! Group policy records by (source, period) and accumulate summary statistics
//!
//! Single pass over the records; each group keeps running sums and counts.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::{debug, info};
use regex::Regex;

use super::{SummaryRow, SummaryTable};
use crate::error::{MpfError, Result};
use crate::mappings::PeriodLabels;
use crate::records::PolicyRecord;

/// Sum that skips blank cells. A group with no values sums to zero.
#[derive(Debug, Clone, Copy, Default)]
struct Sum(f64);

impl Sum {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.0 += v;
        }
    }
}

/// Mean that skips blank cells. A group with no values has no mean.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    total: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.total += v;
            self.n += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.n > 0).then(|| self.total / self.n as f64)
    }
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    line_counts: usize,
    premiums: Sum,
    annuity: Sum,
    age_at_entry: Mean,
    duration: Mean,
    renewal_expense: Mean,
    esc_month: Mean,
    /// Escalating policies only: zero percentages never enter
    esc_pc_nonzero: Mean,
}

impl GroupAccumulator {
    fn push(&mut self, record: &PolicyRecord) {
        self.line_counts += 1;
        self.premiums.push(record.prem_single);
        self.annuity.push(record.annuity_annual);
        self.age_at_entry.push(record.age_at_entry);
        self.duration.push(record.duration_if_m);
        self.renewal_expense.push(record.annuity_expense_ren);
        self.esc_month.push(record.annuity_esc_month);
        self.esc_pc_nonzero
            .push(record.annuity_esc_pc.filter(|pc| *pc != 0.0));
    }

    fn finish(self, source: String, period_code: u32, period: String) -> SummaryRow {
        SummaryRow {
            source,
            period,
            period_code,
            line_counts: self.line_counts,
            total_premiums: self.premiums.0,
            total_annuity_benefits: self.annuity.0,
            avg_age_at_entry: self.age_at_entry.value(),
            avg_duration: self.duration.value(),
            avg_ren_exp_per_policy: self.renewal_expense.value(),
            avg_esc_month: self.esc_month.value(),
            avg_esc_perc_npa: self.esc_pc_nonzero.value(),
        }
    }
}

fn period_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("period code pattern is valid"))
}

/// First run of digits in a raw period identifier, e.g. "MPF_P05" -> "05"
pub fn extract_period_code(raw: &str) -> Option<&str> {
    period_code_pattern().find(raw).map(|m| m.as_str())
}

/// Translate a raw period identifier to its (code, label)
pub fn translate_period(raw: &str, periods: &PeriodLabels) -> Result<(u32, String)> {
    let token = extract_period_code(raw).ok_or_else(|| MpfError::PeriodWithoutCode(raw.to_string()))?;

    token
        .parse::<u32>()
        .ok()
        .and_then(|code| periods.label(code).map(|label| (code, label.to_string())))
        .ok_or_else(|| MpfError::UnmappedPeriod {
            raw: raw.to_string(),
            code: token.to_string(),
        })
}

/// Aggregate records into one summary row per (source, period) group.
///
/// Rows come back ordered by source, then period code.
pub fn summarize(records: &[PolicyRecord], periods: &PeriodLabels) -> Result<SummaryTable> {
    let mut groups: BTreeMap<(&str, &str), GroupAccumulator> = BTreeMap::new();

    for record in records {
        groups
            .entry((record.source.as_str(), record.period.as_str()))
            .or_default()
            .push(record);
    }

    debug!("Grouped {} records into {} (source, period) groups", records.len(), groups.len());

    let mut rows = Vec::with_capacity(groups.len());
    for ((source, raw_period), group) in groups {
        let (code, label) = translate_period(raw_period, periods)?;
        rows.push(group.finish(source.to_string(), code, label));
    }

    rows.sort_by(|a, b| a.source.cmp(&b.source).then(a.period_code.cmp(&b.period_code)));

    info!("Aggregated {} records into {} summary rows", records.len(), rows.len());
    Ok(SummaryTable::new(rows))
}
