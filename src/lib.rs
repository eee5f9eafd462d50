//! # harmony-face
//!
//! Facial harmony scoring from 68-point 2D facial landmarks.
//!
//! This crate provides:
//! - **Metrics**: proportion ratios, feature ratios, angles and left/right
//!   symmetry deltas measured from the landmarks
//! - **Quality**: head roll, a yaw proxy and inter-pupillary distance, with an
//!   advisory verdict on whether the capture is reliable
//! - **Scoring**: each metric scored 0-100 against gender-specific reference
//!   ideals, aggregated into one weighted overall score
//! - **Summary**: a short deterministic narrative of the result
//!
//! Landmark detection itself is out of scope: feed in the 68 points from any
//! detector using the iBUG layout. Results are photo-based approximations,
//! not medical measurements.
//!
//! ## Pipeline
//!
//! 1. Validate the input: exactly 68 finite points, gender `male` or `female`
//! 2. Assess capture quality and compute the raw metrics
//! 3. Score every metric against the [`ReferenceTables`] for the gender
//! 4. Take the weighted mean, renormalizing weights over the metrics present
//! 5. Render the summary from the score tier and the best/worst metrics
//!
//! ## Quick Start
//!
//! ```rust
//! use harmony_face::{reference_face, Analyzer, Gender};
//!
//! // Landmarks normally come from a face landmark detector.
//! let landmarks = reference_face();
//!
//! let analyzer = Analyzer::default();
//! let result = analyzer.analyze(&landmarks, Gender::Male).unwrap();
//!
//! println!("{:.0}/100: {}", result.overall_score, result.summary);
//! for metric in &result.metrics {
//!     println!("{}: {:.3} -> {:.0}", metric.id, metric.raw_value, metric.score);
//! }
//! ```
//!
//! ## Custom Reference Tables
//!
//! Tables are plain data and are passed to the analyzer explicitly:
//!
//! ```rust
//! use harmony_face::{Analyzer, AnalyzerConfig, ReferenceTables};
//!
//! let json = ReferenceTables::standard().to_json_string().unwrap();
//! // ... edit the JSON, or load your own with `ReferenceTables::load(path)` ...
//! let tables = ReferenceTables::from_json_str(&json).unwrap();
//! let analyzer = Analyzer::new(tables, AnalyzerConfig::default()).unwrap();
//! # let _ = analyzer;
//! ```

mod analyzer;
mod config;
mod error;
pub mod geometry;
pub mod landmarks;
mod metrics;
mod quality;
mod reference;
mod report;
mod scoring;
mod summary;
mod types;

pub use analyzer::{AnalysisResult, Analyzer};
pub use config::{AnalyzerConfig, QualityThresholds, ScoringConfig};
pub use error::{Error, ErrorKind, Result};
pub use landmarks::reference_face;
pub use metrics::{compute_metrics, Metric, MetricId, Unit};
pub use quality::{assess_quality, QualityIssue, QualityReport};
pub use reference::{Gender, Ideal, ReferenceEntry, ReferenceTables};
pub use report::{format_metrics, format_value, MetricReport};
pub use scoring::ScoringEngine;
pub use summary::{generate_summary, highlights, Tier};
pub use types::{LandmarkSet, Point, LANDMARK_COUNT};
