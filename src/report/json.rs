//! JSON rendering of the dashboard

use chrono::{DateTime, Local};
use serde::Serialize;

use super::style::{Shade, Theme};
use crate::comparison::ComparisonBody;
use crate::dashboard::{DashboardView, MetricPanel};
use crate::error::Result;

#[derive(Serialize)]
struct JsonPanel<'a> {
    #[serde(flatten)]
    panel: &'a MetricPanel,
    /// Background colour per difference cell, empty without a difference column
    difference_backgrounds: Vec<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    theme: Theme,
    title: &'a str,
    subtitle: &'a str,
    products: &'a [String],
    sources: &'a [String],
    periods: &'a [String],
    panels: Vec<JsonPanel<'a>>,
}

pub fn render_json(view: &DashboardView, theme: Theme, generated_at: DateTime<Local>) -> Result<String> {
    let panels = view
        .panels
        .iter()
        .map(|panel| JsonPanel {
            panel,
            difference_backgrounds: match &panel.table.body {
                ComparisonBody::Formatted(rows) => rows
                    .iter()
                    .map(|r| theme.background(Shade::of(r.raw_difference)).to_string())
                    .collect(),
                ComparisonBody::Raw(_) => Vec::new(),
            },
        })
        .collect();

    let report = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        theme,
        title: &view.title,
        subtitle: &view.subtitle,
        products: &view.products,
        sources: &view.sources,
        periods: &view.periods,
        panels,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::dashboard::{DashboardConfig, Session};
    use crate::mappings::Mappings;
    use crate::records::PolicyRecord;
    use crate::summary::summarize;

    #[test]
    fn test_render_json_panels() {
        let mut jun = PolicyRecord::new("C_IL_S", "P5");
        jun.prem_single = Some(100.0);
        let mut dec = PolicyRecord::new("C_IL_S", "P4");
        dec.prem_single = Some(80.0);

        let mappings = Mappings::default();
        let summary = summarize(&[jun, dec], &mappings.periods).unwrap();
        let mut session = Session::new(Arc::new(summary), Arc::new(mappings), DashboardConfig::default()).unwrap();
        let view = session.view(&["Index-Linked".to_string()]).unwrap();

        let json = render_json(&view, Theme::Light, Local::now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["theme"], "light");
        let panels = value["panels"].as_array().unwrap();
        assert_eq!(panels.len(), 7);

        let premiums = &panels[1];
        assert_eq!(premiums["metric"], "Total_Premiums");
        assert_eq!(premiums["table"]["body"]["kind"], "formatted");
        assert_eq!(premiums["table"]["body"]["rows"][0]["difference"], "20");
        assert_eq!(premiums["difference_backgrounds"][0], "#ccffcc");
        assert_eq!(premiums["chart"]["series"][0]["points"][0]["period"], "Dec23");
    }
}
