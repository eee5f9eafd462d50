//! Gender-specific reference ideals for every metric.
//!
//! A [`ReferenceTables`] value is built once (from the shipped defaults or a
//! JSON file), validated, and then only read. It is handed to the scoring
//! engine explicitly so tests and callers can swap in their own tables.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::MetricId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(Error::InvalidGender(s.to_string())),
        }
    }
}

/// Target for a metric: a single ideal value or an acceptable range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ideal {
    Value(f64),
    Range(f64, f64),
}

impl Ideal {
    /// How far `value` is from the ideal; zero anywhere inside a range.
    pub fn deviation(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        match *self {
            Ideal::Value(ideal) => (value - ideal).abs(),
            Ideal::Range(lo, hi) => {
                if value < lo {
                    lo - value
                } else if value > hi {
                    value - hi
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub metric: MetricId,
    pub gender: Gender,
    pub ideal: Ideal,
    /// Deviation at which the score falls to the configured tolerance score.
    pub tolerance: f64,
    /// Relative importance in the overall score; normalized at scoring time.
    pub weight: f64,
}

/// Validated lookup from (metric, gender) to its reference entry.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    entries: BTreeMap<(MetricId, Gender), ReferenceEntry>,
}

impl ReferenceTables {
    /// Build tables from raw entries, rejecting duplicates, bad numbers and
    /// metrics missing for either gender.
    pub fn new(entries: Vec<ReferenceEntry>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            validate_entry(&entry)?;
            if map.insert((entry.metric, entry.gender), entry).is_some() {
                return Err(Error::InvalidReference(format!(
                    "duplicate entry for {} ({})",
                    entry.metric, entry.gender
                )));
            }
        }

        for metric in MetricId::ALL {
            for gender in Gender::ALL {
                if !map.contains_key(&(metric, gender)) {
                    return Err(Error::UnknownMetric { metric, gender });
                }
            }
        }

        Ok(Self { entries: map })
    }

    /// The shipped reference table.
    pub fn standard() -> Self {
        let entries = STANDARD
            .iter()
            .flat_map(|&(metric, male, female, tolerance, weight)| {
                [
                    ReferenceEntry {
                        metric,
                        gender: Gender::Male,
                        ideal: male,
                        tolerance,
                        weight,
                    },
                    ReferenceEntry {
                        metric,
                        gender: Gender::Female,
                        ideal: female,
                        tolerance,
                        weight,
                    },
                ]
            })
            .map(|e| ((e.metric, e.gender), e))
            .collect();
        Self { entries }
    }

    /// Parse tables from a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading reference tables from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let entries: Vec<&ReferenceEntry> = self.entries.values().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    pub fn get(&self, metric: MetricId, gender: Gender) -> Result<&ReferenceEntry> {
        self.entries
            .get(&(metric, gender))
            .ok_or(Error::UnknownMetric { metric, gender })
    }

    pub fn entries(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.values()
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_entry(entry: &ReferenceEntry) -> Result<()> {
    let bad = |what: &str| {
        Err(Error::InvalidReference(format!(
            "{} ({}): {what}",
            entry.metric, entry.gender
        )))
    };
    if !(entry.weight.is_finite() && entry.weight > 0.0) {
        return bad("weight must be positive");
    }
    if !(entry.tolerance.is_finite() && entry.tolerance > 0.0) {
        return bad("tolerance must be positive");
    }
    match entry.ideal {
        Ideal::Value(v) if !v.is_finite() => bad("ideal must be finite"),
        Ideal::Range(lo, hi) if !(lo.is_finite() && hi.is_finite()) => {
            bad("range bounds must be finite")
        }
        Ideal::Range(lo, hi) if lo > hi => bad("range lower bound exceeds upper bound"),
        _ => Ok(()),
    }
}

/// (metric, male ideal, female ideal, tolerance, weight)
///
/// Approximate photo-based targets. Symmetry deltas are in units of IPD
/// and aim for zero.
const STANDARD: [(MetricId, Ideal, Ideal, f64, f64); 13] = [
    (MetricId::FacialThirds, Ideal::Range(0.90, 1.00), Ideal::Range(0.95, 1.05), 0.10, 1.5),
    (MetricId::FacialWidthHeight, Ideal::Range(1.85, 2.05), Ideal::Range(1.75, 1.95), 0.15, 1.0),
    (MetricId::BigonialBizygomatic, Ideal::Range(0.88, 0.96), Ideal::Range(0.80, 0.88), 0.05, 1.0),
    (MetricId::NasalIndex, Ideal::Range(0.65, 0.80), Ideal::Range(0.60, 0.75), 0.08, 0.75),
    (MetricId::LipFullness, Ideal::Range(1.50, 2.00), Ideal::Range(1.30, 1.70), 0.30, 0.5),
    (MetricId::PhiltrumLip, Ideal::Range(0.55, 0.75), Ideal::Range(0.45, 0.65), 0.15, 0.5),
    (MetricId::EyeWidthIpd, Ideal::Range(0.44, 0.50), Ideal::Range(0.46, 0.52), 0.05, 0.75),
    (MetricId::CanthalTilt, Ideal::Range(2.0, 6.0), Ideal::Range(4.0, 9.0), 3.0, 1.0),
    (MetricId::JawAngle, Ideal::Range(115.0, 125.0), Ideal::Range(120.0, 130.0), 8.0, 1.0),
    (MetricId::JawSymmetry, Ideal::Value(0.0), Ideal::Value(0.0), 0.03, 1.5),
    (MetricId::EyebrowSymmetry, Ideal::Value(0.0), Ideal::Value(0.0), 0.03, 0.75),
    (MetricId::EyeSymmetry, Ideal::Value(0.0), Ideal::Value(0.0), 0.03, 1.0),
    (MetricId::MouthSymmetry, Ideal::Value(0.0), Ideal::Value(0.0), 0.03, 1.0),
];
