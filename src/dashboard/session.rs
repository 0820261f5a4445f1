//! Per-user dashboard session
//!
//! The aggregated summary and the mappings are shared read-only; each session
//! keeps its own memo of comparison tables so repeated interactions with the
//! same selection skip the pivot.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use super::{select_sources, DashboardConfig, DashboardView, LineChart, MetricPanel};
use crate::comparison::{build_comparison, ComparisonTable};
use crate::error::{MpfError, Result};
use crate::mappings::Mappings;
use crate::summary::{Metric, SummaryRow, SummaryTable};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    sources: Vec<String>,
    metric: Metric,
    periods: Vec<String>,
}

#[derive(Debug)]
pub struct Session {
    summary: Arc<SummaryTable>,
    mappings: Arc<Mappings>,
    config: DashboardConfig,
    cache: HashMap<CacheKey, ComparisonTable>,
}

impl Session {
    /// Open a session over a loaded summary. Every configured comparison
    /// period must be a known period label.
    pub fn new(summary: Arc<SummaryTable>, mappings: Arc<Mappings>, config: DashboardConfig) -> Result<Self> {
        if let Some(unknown) = config
            .periods
            .iter()
            .find(|p| !mappings.periods.contains_label(p))
        {
            return Err(MpfError::UnknownPeriodLabel(unknown.clone()));
        }

        for source in summary.sources() {
            if mappings.products.rank(source).is_none() {
                warn!("Source {} is not listed under any product and cannot be selected", source);
            }
        }

        Ok(Self {
            summary,
            mappings,
            config,
            cache: HashMap::new(),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    /// Number of memoized comparison tables
    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }

    /// Every product, the default selection
    pub fn all_products(&self) -> Vec<String> {
        self.mappings.products.products().map(str::to_string).collect()
    }

    /// Recompute the whole view for a product selection.
    ///
    /// An empty selection gives an empty view.
    pub fn view(&mut self, selected_products: &[String]) -> Result<DashboardView> {
        let sources = select_sources(&self.mappings.products, selected_products)?;

        let mut view = DashboardView {
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
            products: selected_products.to_vec(),
            sources: sources.clone(),
            periods: self.config.periods.clone(),
            panels: Vec::new(),
        };

        if sources.is_empty() {
            debug!("Empty product selection, nothing to render");
            return Ok(view);
        }

        let summary = Arc::clone(&self.summary);
        let rows: Vec<&SummaryRow> = summary.for_sources(&sources).collect();

        let escalation_sources: Vec<String> = self
            .mappings
            .escalation_sources()
            .iter()
            .filter(|s| sources.contains(s))
            .cloned()
            .collect();
        let escalation_rows: Vec<&SummaryRow> = rows
            .iter()
            .copied()
            .filter(|r| escalation_sources.contains(&r.source))
            .collect();

        for metric in Metric::ALL {
            let chart = if metric.is_escalation_only() {
                if escalation_sources.is_empty() {
                    continue;
                }
                LineChart::build(metric, &escalation_sources, &escalation_rows)
            } else {
                LineChart::build(metric, &sources, &rows)
            };

            let table = self.comparison(&sources, &rows, metric)?;

            view.panels.push(MetricPanel {
                heading: format!("Comparison of {}", metric),
                metric,
                table,
                chart,
            });
        }

        debug!(
            "Built {} panels for {} sources ({} tables cached)",
            view.panels.len(),
            sources.len(),
            self.cache.len()
        );
        Ok(view)
    }

    fn comparison(&mut self, sources: &[String], rows: &[&SummaryRow], metric: Metric) -> Result<ComparisonTable> {
        let key = CacheKey {
            sources: sources.to_vec(),
            metric,
            periods: self.config.periods.clone(),
        };

        if let Some(table) = self.cache.get(&key) {
            return Ok(table.clone());
        }

        let table = build_comparison(
            rows.iter().copied(),
            &self.config.periods,
            metric,
            &self.mappings.products,
        )?;
        self.cache.insert(key, table.clone());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ComparisonBody;
    use crate::records::PolicyRecord;
    use crate::summary::summarize;

    fn record(source: &str, period: &str, premium: f64, esc_pc: f64) -> PolicyRecord {
        PolicyRecord {
            prem_single: Some(premium),
            annuity_annual: Some(premium / 20.0),
            age_at_entry: Some(66.0),
            duration_if_m: Some(18.0),
            annuity_expense_ren: Some(35.0),
            annuity_esc_month: Some(1.0),
            annuity_esc_pc: Some(esc_pc),
            ..PolicyRecord::new(source, period)
        }
    }

    fn session() -> Session {
        let records = vec![
            record("C_IL_S", "P5", 100.0, 0.0),
            record("C_IL_S", "P4", 80.0, 0.0),
            record("C_NP_S", "P5", 1_000.0, 3.0),
            record("C_NP_S", "P5", 1_000.0, 0.0),
            record("C_NP_S", "P4", 900.0, 5.0),
            record("C_MX_T", "P3", 40.0, 0.0),
        ];
        let mappings = Mappings::default();
        let summary = summarize(&records, &mappings.periods).unwrap();
        Session::new(Arc::new(summary), Arc::new(mappings), DashboardConfig::default()).unwrap()
    }

    fn products(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_selection_renders_nothing() {
        let mut session = session();
        let view = session.view(&[]).unwrap();
        assert!(view.panels.is_empty());
        assert!(view.sources.is_empty());
        assert_eq!(session.cached_tables(), 0);
    }

    #[test]
    fn test_escalation_panel_needs_non_profit_source() {
        let mut session = session();

        let view = session.view(&products(&["Index-Linked", "Max Income"])).unwrap();
        assert_eq!(view.panels.len(), 7);
        assert!(view.panels.iter().all(|p| p.metric != Metric::AvgEscPercNpa));

        let view = session.view(&products(&["Index-Linked", "Non-Profit"])).unwrap();
        assert_eq!(view.panels.len(), 8);
        let npa = view.panels.last().unwrap();
        assert_eq!(npa.metric, Metric::AvgEscPercNpa);
        assert_eq!(npa.heading, "Comparison of Avg_Esc_Perc_NPA");

        // Chart restricted to the NPA family, table over the whole selection
        let chart_sources: Vec<&str> = npa.chart.series.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(chart_sources, vec!["C_NP_S"]);
        assert_eq!(npa.table.sources(), vec!["C_IL_S", "C_NP_S"]);
        match &npa.table.body {
            ComparisonBody::Formatted(rows) => {
                assert_eq!(rows[0].values, vec!["", ""]);
                assert_eq!(rows[1].values, vec!["3", "5"]);
                assert_eq!(rows[1].difference, "-2");
            }
            ComparisonBody::Raw(_) => panic!("default periods give a formatted table"),
        }
    }

    #[test]
    fn test_panels_filtered_to_selection() {
        let mut session = session();
        let view = session.view(&products(&["Index-Linked"])).unwrap();

        let premiums = &view.panels[1];
        assert_eq!(premiums.metric, Metric::TotalPremiums);
        assert_eq!(premiums.table.sources(), vec!["C_IL_S"]);
        match &premiums.table.body {
            ComparisonBody::Formatted(rows) => {
                assert_eq!(rows[0].values, vec!["100", "80"]);
                assert_eq!(rows[0].difference, "20");
            }
            ComparisonBody::Raw(_) => panic!("default periods give a formatted table"),
        }
        assert_eq!(premiums.chart.series.len(), 1);
    }

    #[test]
    fn test_cached_view_matches_fresh_session() {
        let selection = products(&["Non-Profit", "Max Income"]);

        let mut cached = session();
        let first = cached.view(&selection).unwrap();
        let tables = cached.cached_tables();
        let second = cached.view(&selection).unwrap();

        assert_eq!(tables, 8);
        assert_eq!(cached.cached_tables(), tables);
        assert_eq!(first, second);

        let mut fresh = session();
        assert_eq!(fresh.view(&selection).unwrap(), second);
    }

    #[test]
    fn test_unknown_period_rejected() {
        let config = DashboardConfig {
            periods: vec!["Jun24".to_string(), "Mar24".to_string()],
            ..DashboardConfig::default()
        };
        let result = Session::new(Arc::new(SummaryTable::default()), Arc::new(Mappings::default()), config);
        assert!(matches!(result, Err(MpfError::UnknownPeriodLabel(p)) if p == "Mar24"));
    }

    #[test]
    fn test_sample_extract_end_to_end() {
        let records = crate::records::load_records("data/sample_mpf.csv").expect("Failed to load sample extract");
        let mappings = Mappings::default();
        let summary = summarize(&records, &mappings.periods).unwrap();

        // 8 sources over 3 periods
        assert_eq!(summary.len(), 24);
        assert_eq!(
            summary.rows().iter().map(|r| r.line_counts).sum::<usize>(),
            records.len()
        );

        let mut session = Session::new(Arc::new(summary), Arc::new(mappings), DashboardConfig::default()).unwrap();
        let all = session.all_products();
        let view = session.view(&all).unwrap();

        assert_eq!(view.panels.len(), 8);
        let counts = &view.panels[0].table;
        assert_eq!(
            counts.sources(),
            vec!["C_IL_S", "C_IL_J", "C_NI_S", "C_NP_S", "C_NP_J", "C_MX_T", "C_OP_S", "C_PM_J"]
        );
        assert!(view.panels.iter().all(|p| p.chart.periods() == vec!["Jun23", "Dec23", "Jun24"]
            || p.chart.series.is_empty()));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let mut session = session();
        assert!(matches!(
            session.view(&products(&["Unit-Linked"])),
            Err(MpfError::UnknownProduct(_))
        ));
    }
}
