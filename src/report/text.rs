//! Terminal rendering of the dashboard

use std::io::{self, Write};

use chrono::{DateTime, Local};

use super::style::{paint, Shade, Theme};
use crate::comparison::{ComparisonBody, ComparisonTable};
use crate::dashboard::{DashboardView, LineChart};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub theme: Theme,
    /// Emit ANSI colour codes for difference cells
    pub color: bool,
}

fn fixed(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// Aligned table: first column left, the rest right. When `shades` is given,
/// the last column is painted with the theme colours.
fn write_grid<W: Write>(
    out: &mut W,
    header: &[String],
    rows: &[Vec<String>],
    shades: Option<&[Shade]>,
    options: &TextOptions,
) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> Vec<String> {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                if i == 0 {
                    format!("{:<w$}", cell, w = *w)
                } else {
                    format!("{:>w$}", cell, w = *w)
                }
            })
            .collect()
    };

    writeln!(out, "  {}", line(header).join("  "))?;
    writeln!(out, "  {}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)))?;

    for (r, row) in rows.iter().enumerate() {
        let mut cells = line(row.as_slice());
        if let (Some(shades), true) = (shades, options.color) {
            if let (Some(last), Some(shade)) = (cells.last_mut(), shades.get(r)) {
                *last = paint(last, options.theme.background(*shade));
            }
        }
        writeln!(out, "  {}", cells.join("  "))?;
    }

    Ok(())
}

fn write_comparison<W: Write>(out: &mut W, table: &ComparisonTable, options: &TextOptions) -> io::Result<()> {
    let mut header = vec!["SOURCE".to_string()];
    header.extend(table.columns().into_iter().map(str::to_string));

    match &table.body {
        ComparisonBody::Formatted(rows) => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.source.clone()];
                    cells.extend(r.values.iter().cloned());
                    cells.push(r.difference.clone());
                    cells
                })
                .collect();
            let shades: Vec<Shade> = rows.iter().map(|r| Shade::of(r.raw_difference)).collect();
            write_grid(out, &header, &cells, Some(shades.as_slice()), options)
        }
        ComparisonBody::Raw(rows) => {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    let mut cells = vec![r.source.clone()];
                    cells.extend(r.values.iter().map(|v| fixed(*v)));
                    cells
                })
                .collect();
            write_grid(out, &header, &cells, None, options)
        }
    }
}

fn write_chart<W: Write>(out: &mut W, chart: &LineChart, options: &TextOptions) -> io::Result<()> {
    writeln!(out, "{}", chart.title)?;

    let periods = chart.periods();
    let mut header = vec!["SOURCE".to_string()];
    header.extend(periods.iter().map(|p| p.to_string()));

    let rows: Vec<Vec<String>> = chart
        .series
        .iter()
        .map(|series| {
            let mut cells = vec![series.source.clone()];
            cells.extend(periods.iter().map(|period| {
                series
                    .points
                    .iter()
                    .find(|p| p.period == *period)
                    .map(|p| fixed(p.value))
                    .unwrap_or_default()
            }));
            cells
        })
        .collect();

    write_grid(out, &header, &rows, None, options)
}

/// Write the full dashboard: header, then one table and chart per metric
pub fn write_text<W: Write>(
    out: &mut W,
    view: &DashboardView,
    options: &TextOptions,
    generated_at: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", view.subtitle)?;
    writeln!(out, "{}", "=".repeat(view.subtitle.len().max(view.title.len())))?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "Products:  {}", view.products.join(", "))?;

    if view.panels.is_empty() {
        writeln!(out, "\nNo products selected.")?;
        return Ok(());
    }

    for panel in &view.panels {
        writeln!(out)?;
        writeln!(out, "{}", "-".repeat(60))?;
        writeln!(out, "{}", panel.heading)?;
        write_comparison(out, &panel.table, options)?;
        writeln!(out)?;
        write_chart(out, &panel.chart, options)?;
    }

    Ok(())
}
