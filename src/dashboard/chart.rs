//! Time-series line chart data, one line per source

use serde::Serialize;

use crate::summary::{Metric, SummaryRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub period: String,
    pub period_code: u32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub source: String,
    pub points: Vec<ChartPoint>,
}

/// Metric plotted against period label with markers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x: &'static str,
    pub y: Metric,
    pub markers: bool,
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    /// Build one series per source, in the order given. Sources without rows
    /// get no series; points run in period-code order.
    pub fn build(metric: Metric, sources: &[String], rows: &[&SummaryRow]) -> Self {
        let series = sources
            .iter()
            .filter_map(|source| {
                let mut own: Vec<&SummaryRow> = rows
                    .iter()
                    .copied()
                    .filter(|r| &r.source == source)
                    .collect();
                if own.is_empty() {
                    return None;
                }
                own.sort_by_key(|r| r.period_code);

                Some(ChartSeries {
                    source: source.clone(),
                    points: own
                        .into_iter()
                        .map(|r| ChartPoint {
                            period: r.period.clone(),
                            period_code: r.period_code,
                            value: r.value(metric),
                        })
                        .collect(),
                })
            })
            .collect();

        Self {
            title: metric.chart_title().to_string(),
            x: "Period",
            y: metric,
            markers: true,
            series,
        }
    }

    /// Period labels across all series, in period-code order
    pub fn periods(&self) -> Vec<&str> {
        let mut points: Vec<&ChartPoint> = self.series.iter().flat_map(|s| s.points.iter()).collect();
        points.sort_by_key(|p| p.period_code);
        points.dedup_by_key(|p| p.period_code);
        points.into_iter().map(|p| p.period.as_str()).collect()
    }
}
