use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::metrics::{compute_metrics, Metric};
use crate::quality::{assess_quality, QualityReport};
use crate::reference::{Gender, ReferenceTables};
use crate::scoring::ScoringEngine;
use crate::summary::generate_summary;
use crate::types::{LandmarkSet, Point};

/// Everything produced for one analyzed face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metrics: Vec<Metric>,
    pub overall_score: f64,
    pub quality: QualityReport,
    pub summary: String,
}

/// The scoring pipeline.
///
/// Holds only immutable data, so one analyzer can serve any number of
/// concurrent calls.
///
/// # Usage
///
/// ```
/// use harmony_face::{reference_face, Analyzer, Gender};
///
/// let analyzer = Analyzer::default();
/// let result = analyzer.analyze(&reference_face(), Gender::Female).unwrap();
/// assert!(result.quality.acceptable);
/// assert!((0.0..=100.0).contains(&result.overall_score));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    tables: ReferenceTables,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer from explicit tables and config.
    pub fn new(tables: ReferenceTables, config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { tables, config })
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze raw detector output.
    ///
    /// Validates the point count and the gender string before doing any
    /// geometry.
    pub fn analyze_points(&self, points: &[Point], gender: &str) -> Result<AnalysisResult> {
        let landmarks = LandmarkSet::new(points.to_vec())?;
        let gender: Gender = gender.parse()?;
        self.analyze(&landmarks, gender)
    }

    pub fn analyze(&self, landmarks: &LandmarkSet, gender: Gender) -> Result<AnalysisResult> {
        let quality = assess_quality(landmarks, &self.config.quality)?;
        let mut metrics = compute_metrics(landmarks)?;

        let engine = ScoringEngine::new(&self.tables, &self.config.scoring);
        engine.score_metrics(&mut metrics, gender)?;
        let overall_score = engine.overall_score(&metrics, gender)?;
        debug!("overall score {overall_score:.2} ({gender})");

        let summary = generate_summary(overall_score, &metrics, gender);
        info!(
            "analysis complete: score={overall_score:.1} acceptable={}",
            quality.acceptable
        );

        Ok(AnalysisResult {
            metrics,
            overall_score,
            quality,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::landmarks::reference_face;

    #[test]
    fn analyzes_reference_face() {
        let analyzer = Analyzer::default();
        let result = analyzer.analyze(&reference_face(), Gender::Male).unwrap();
        assert_eq!(result.metrics.len(), 13);
        assert!(result.quality.acceptable);
        assert!(result.summary.contains("male reference proportions"));
    }

    #[test]
    fn analyze_points_validates_input() {
        let analyzer = Analyzer::default();
        let points = reference_face().points().to_vec();

        assert!(matches!(
            analyzer.analyze_points(&points[..67], "male"),
            Err(Error::InvalidLandmarkSet { found: 67, .. })
        ));
        assert!(matches!(
            analyzer.analyze_points(&points, "other"),
            Err(Error::InvalidGender(_))
        ));
        assert!(analyzer.analyze_points(&points, "female").is_ok());
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = AnalyzerConfig::default();
        config.scoring.tolerance_score = 0.0;
        assert!(matches!(
            Analyzer::new(ReferenceTables::standard(), config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
