//! one-shot plain-text snapshot of a single batch (`--once`)

use std::fmt::Write;

use crate::dashboard::gauge::{
    fill_percent, stress_label, temperature_label, TEMPERATURE_FALLBACK, TEMPERATURE_MAX,
};
use crate::dashboard::table::ReadingTable;
use crate::domain::{latest, Reading};

pub fn build_report(source: &str, batch: &[Reading]) -> String {
    let mut table = ReadingTable::new();
    table.rebuild(batch);

    let mut widths = [0usize; 5];
    for row in table.rows() {
        for (w, cell) in widths.iter_mut().zip(row.cells.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "source: {}", source);
    let _ = writeln!(output, "records: {}", batch.len());
    let _ = writeln!(output);

    for row in table.rows() {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect();
        let _ = writeln!(output, "{}", line.join("  ").trim_end());
    }

    let _ = writeln!(output);
    match latest(batch) {
        Some(last) => {
            let temp_fill = fill_percent(
                last.temperature.unwrap_or(TEMPERATURE_FALLBACK),
                TEMPERATURE_MAX,
            );
            let _ = writeln!(output, "stress:      {}", stress_label(last.stress_score));
            let _ = writeln!(
                output,
                "temperature: {} ({:.0}% of gauge)",
                temperature_label(last.temperature),
                temp_fill
            );
        }
        None => {
            let _ = writeln!(output, "no readings in this batch");
        }
    }

    output
}
