//! Deterministic narrative built from the overall score and the metric ranking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::Metric;
use crate::reference::Gender;

/// Qualitative bucket for an overall score, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Exceptional,
    AboveAverage,
    Average,
    BelowAverage,
    NeedsImprovement,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Tier::Exceptional
        } else if score >= 70.0 {
            Tier::AboveAverage
        } else if score >= 55.0 {
            Tier::Average
        } else if score >= 40.0 {
            Tier::BelowAverage
        } else {
            Tier::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Exceptional => "exceptional",
            Tier::AboveAverage => "above average",
            Tier::Average => "average",
            Tier::BelowAverage => "below average",
            Tier::NeedsImprovement => "needs improvement",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First metric with the highest score and first with the lowest, in input order.
pub fn highlights(metrics: &[Metric]) -> Option<(&Metric, &Metric)> {
    let mut iter = metrics.iter();
    let first = iter.next()?;
    let (mut best, mut worst) = (first, first);
    for m in iter {
        if m.score > best.score {
            best = m;
        }
        if m.score < worst.score {
            worst = m;
        }
    }
    Some((best, worst))
}

pub fn generate_summary(overall_score: f64, metrics: &[Metric], gender: Gender) -> String {
    let tier = Tier::from_score(overall_score);
    let mut s = format!(
        "Overall facial harmony is {tier} ({overall_score:.0}/100) against {gender} reference proportions."
    );

    match highlights(metrics) {
        Some((best, worst)) if best.score > worst.score => {
            s.push_str(&format!(
                " Strongest feature: {} ({:.0}/100). Most room for improvement: {} ({:.0}/100).",
                best.id.label(),
                best.score,
                worst.id.label(),
                worst.score
            ));
        }
        Some((best, _)) => {
            s.push_str(&format!(
                " All {} measurements scored evenly ({:.0}/100).",
                metrics.len(),
                best.score
            ));
        }
        None => {}
    }

    s.push_str(match tier {
        Tier::Exceptional => " Proportions sit very close to the reference ideals.",
        Tier::AboveAverage => " Most proportions are close to the reference ideals.",
        Tier::Average => " Proportions are broadly typical, with a few notable deviations.",
        Tier::BelowAverage => " Several proportions deviate from the reference ideals.",
        Tier::NeedsImprovement => {
            " Many proportions deviate from the reference ideals; photo angle and lighting can play a large part."
        }
    });
    s
}
