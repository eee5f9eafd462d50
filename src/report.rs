//! Display rows for scored metrics.

use serde::Serialize;

use crate::error::Result;
use crate::metrics::{Metric, MetricId, Unit};
use crate::reference::{Gender, Ideal, ReferenceTables};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub id: MetricId,
    pub label: &'static str,
    pub value: String,
    pub ideal: String,
    pub score: u32,
}

pub fn format_metrics(
    metrics: &[Metric],
    tables: &ReferenceTables,
    gender: Gender,
) -> Result<Vec<MetricReport>> {
    metrics
        .iter()
        .map(|m| {
            let entry = tables.get(m.id, gender)?;
            Ok(MetricReport {
                id: m.id,
                label: m.id.label(),
                value: format_value(m.raw_value, m.unit),
                ideal: format_ideal(entry.ideal, m.unit),
                score: m.score.round().clamp(0.0, 100.0) as u32,
            })
        })
        .collect()
}

pub fn format_value(value: f64, unit: Unit) -> String {
    match unit {
        Unit::Ratio => format!("{value:.2}"),
        Unit::Degrees => format!("{value:.1}°"),
        Unit::Pixels => format!("{value:.0} px"),
    }
}

fn format_ideal(ideal: Ideal, unit: Unit) -> String {
    match ideal {
        Ideal::Value(v) => format_value(v, unit),
        Ideal::Range(lo, hi) => format!("{} - {}", format_value(lo, unit), format_value(hi, unit)),
    }
}
