//! Maps raw metric values onto 0-100 scores and aggregates them.
//!
//! ## Falloff
//!
//! For a deviation `d` from the ideal (zero anywhere inside an ideal range)
//! and a per-entry tolerance `t`:
//!
//! ```text
//! score = 100 * s^((d / t)^2)        s = tolerance_score / 100
//! ```
//!
//! so `d = 0` scores exactly 100, `d = t` scores the tolerance score (90 by
//! default), and the score keeps shrinking towards 0 as `d` grows. The curve
//! is strictly decreasing for `d > 0`, which keeps symmetry deltas sensitive
//! to small asymmetries.

use log::debug;

use crate::config::ScoringConfig;
use crate::error::{Error, Result};
use crate::metrics::Metric;
use crate::reference::{Gender, ReferenceEntry, ReferenceTables};

pub struct ScoringEngine<'a> {
    tables: &'a ReferenceTables,
    config: &'a ScoringConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(tables: &'a ReferenceTables, config: &'a ScoringConfig) -> Self {
        Self { tables, config }
    }

    /// Score of a single raw value against its reference entry.
    pub fn score_value(&self, entry: &ReferenceEntry, raw_value: f64) -> f64 {
        let d = entry.ideal.deviation(raw_value);
        let base = self.config.tolerance_score / 100.0;
        let score = 100.0 * base.powf((d / entry.tolerance).powi(2));
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        }
    }

    /// Fill in `score` on every metric.
    pub fn score_metrics(&self, metrics: &mut [Metric], gender: Gender) -> Result<()> {
        for metric in metrics.iter_mut() {
            let entry = self.tables.get(metric.id, gender)?;
            metric.score = self.score_value(entry, metric.raw_value);
            debug!(
                "scored {} raw={:.4} ideal={:?} -> {:.1}",
                metric.id, metric.raw_value, entry.ideal, metric.score
            );
        }
        Ok(())
    }

    /// Weighted mean of the metrics' scores.
    ///
    /// Weights are renormalized over exactly the metrics given, so leaving a
    /// metric out redistributes its weight instead of counting it as zero.
    pub fn overall_score(&self, metrics: &[Metric], gender: Gender) -> Result<f64> {
        let weights = self.normalized_weights(metrics, gender)?;
        let overall: f64 = metrics
            .iter()
            .zip(weights.iter())
            .map(|(m, w)| m.score * w)
            .sum();
        Ok(overall.clamp(0.0, 100.0))
    }

    /// Per-metric weights scaled to sum to 1 over `metrics`.
    pub fn normalized_weights(&self, metrics: &[Metric], gender: Gender) -> Result<Vec<f64>> {
        if metrics.is_empty() {
            return Err(Error::DivisionByZero(
                "overall score of an empty metric set".into(),
            ));
        }
        let raw = metrics
            .iter()
            .map(|m| self.tables.get(m.id, gender).map(|e| e.weight))
            .collect::<Result<Vec<_>>>()?;
        let total: f64 = raw.iter().sum();
        Ok(raw.into_iter().map(|w| w / total).collect())
    }
}
