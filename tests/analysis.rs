//! End-to-end analysis scenarios on synthetic landmark sets.

use harmony_face::{
    compute_metrics, landmarks, reference_face, AnalysisResult, Analyzer, AnalyzerConfig, Error,
    ErrorKind, Gender, Ideal, LandmarkSet, MetricId, Point, QualityIssue, ReferenceTables,
    ScoringEngine,
};

const EPS: f64 = 1e-9;

/// Reference tables whose ideals are exactly the measurements of `face`.
fn tables_centered_on(face: &LandmarkSet) -> ReferenceTables {
    let metrics = compute_metrics(face).unwrap();
    let entries = ReferenceTables::standard()
        .entries()
        .map(|e| {
            let raw = metrics.iter().find(|m| m.id == e.metric).unwrap().raw_value;
            let mut e = *e;
            e.ideal = Ideal::Value(raw);
            e
        })
        .collect();
    ReferenceTables::new(entries).unwrap()
}

fn ideal_analyzer() -> Analyzer {
    Analyzer::new(tables_centered_on(&reference_face()), AnalyzerConfig::default()).unwrap()
}

fn shift_jaw(face: &LandmarkSet, dx: f64) -> LandmarkSet {
    face.map(|i, p| {
        if landmarks::JAW.contains(&i) {
            p + Point::new(dx, 0.0)
        } else {
            p
        }
    })
}

fn rotate(face: &LandmarkSet, degrees: f64) -> LandmarkSet {
    let (s, c) = degrees.to_radians().sin_cos();
    let center = Point::new(300.0, 250.0);
    face.map(|_, p| {
        let d = p - center;
        center + Point::new(d.x * c - d.y * s, d.x * s + d.y * c)
    })
}

fn score_of(result: &AnalysisResult, id: MetricId) -> f64 {
    result.metrics.iter().find(|m| m.id == id).unwrap().score
}

#[test]
fn ideal_frontal_face_scores_100() {
    let analyzer = ideal_analyzer();
    for gender in Gender::ALL {
        let result = analyzer.analyze(&reference_face(), gender).unwrap();
        assert!(
            (result.overall_score - 100.0).abs() < EPS,
            "overall {}",
            result.overall_score
        );
        assert!(result.metrics.iter().all(|m| m.score == 100.0));
        assert!(result.quality.acceptable);
        assert!(result.quality.roll_degrees.abs() < EPS);
        assert!(result.quality.yaw_proxy.abs() < EPS);
        assert!(result.summary.contains("exceptional"));
    }
}

#[test]
fn jaw_asymmetry_lowers_only_jaw_symmetry() {
    let analyzer = ideal_analyzer();
    let face = reference_face();
    let ipd = analyzer
        .analyze(&face, Gender::Female)
        .unwrap()
        .quality
        .interpupillary_distance_pixels;

    let baseline = analyzer.analyze(&face, Gender::Female).unwrap();
    // Each side moves 0.05 IPD in the same direction: a 0.1 IPD left/right
    // difference for every jaw pair.
    let shifted = analyzer
        .analyze(&shift_jaw(&face, 0.05 * ipd), Gender::Female)
        .unwrap();
    let jaw = shifted
        .metrics
        .iter()
        .find(|m| m.id == MetricId::JawSymmetry)
        .unwrap();
    assert!((jaw.raw_value - 0.1).abs() < EPS, "jaw delta {}", jaw.raw_value);

    assert!(score_of(&shifted, MetricId::JawSymmetry) < score_of(&baseline, MetricId::JawSymmetry));
    assert!(shifted.overall_score < baseline.overall_score);
    for (a, b) in baseline.metrics.iter().zip(shifted.metrics.iter()) {
        if a.id != MetricId::JawSymmetry {
            assert!((a.score - b.score).abs() < EPS, "{} changed", a.id);
            assert!((a.raw_value - b.raw_value).abs() < EPS, "{} changed", a.id);
        }
    }
    assert!(shifted.summary.contains("Most room for improvement: jaw symmetry"));
}

#[test]
fn tilted_capture_is_flagged_but_still_scored() {
    let analyzer = Analyzer::default();
    let result = analyzer
        .analyze(&rotate(&reference_face(), 20.0), Gender::Male)
        .unwrap();
    assert!((result.quality.roll_degrees - 20.0).abs() < 1e-6);
    assert!(!result.quality.acceptable);
    assert!(result.quality.yaw_proxy.abs() < 1e-9);
    assert_eq!(result.quality.issues, vec![QualityIssue::ExcessiveRoll]);
    assert!((0.0..=100.0).contains(&result.overall_score));
    assert_eq!(result.metrics.len(), MetricId::ALL.len());
    assert!(!result.summary.is_empty());
}

#[test]
fn unsupported_gender_is_rejected() {
    let analyzer = Analyzer::default();
    let points = reference_face().points().to_vec();
    let err = analyzer.analyze_points(&points, "other").unwrap_err();
    assert!(matches!(err, Error::InvalidGender(ref g) if g == "other"));
    assert_eq!(err.kind(), ErrorKind::Input);

    for raw in ["MALE", " female ", "Female"] {
        let err = analyzer.analyze_points(&points, raw).unwrap_err();
        assert!(matches!(err, Error::InvalidGender(ref g) if g == raw), "{raw:?}");
    }
}

#[test]
fn point_count_must_be_exactly_68() {
    let analyzer = Analyzer::default();
    let mut points = reference_face().points().to_vec();

    let err = analyzer.analyze_points(&points[..60], "male").unwrap_err();
    assert!(matches!(err, Error::InvalidLandmarkSet { expected: 68, found: 60 }));

    points.push(Point::new(1.0, 1.0));
    let err = analyzer.analyze_points(&points, "male").unwrap_err();
    assert!(matches!(err, Error::InvalidLandmarkSet { expected: 68, found: 69 }));
}

#[test]
fn identical_input_gives_identical_output() {
    let analyzer = Analyzer::default();
    let face = shift_jaw(&reference_face(), 7.0);
    let a = analyzer.analyze(&face, Gender::Female).unwrap();
    let b = analyzer.analyze(&face, Gender::Female).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn symmetric_face_gets_perfect_symmetry_scores() {
    let result = Analyzer::default()
        .analyze(&reference_face(), Gender::Male)
        .unwrap();
    for m in result.metrics.iter().filter(|m| m.id.is_symmetry()) {
        assert_eq!(m.score, 100.0, "{}", m.id);
    }
}

#[test]
fn growing_asymmetry_strictly_lowers_symmetry_score() {
    let analyzer = Analyzer::default();
    let mut previous = 100.0;
    for step in 1..=6 {
        let dx = step as f64 * 2.0;
        // Push the subject's left brow outward.
        let face = reference_face().map(|i, p| {
            if landmarks::LEFT_BROW.contains(&i) {
                p + Point::new(dx, 0.0)
            } else {
                p
            }
        });
        let result = analyzer.analyze(&face, Gender::Female).unwrap();
        let score = score_of(&result, MetricId::EyebrowSymmetry);
        assert!(score < previous, "step {step}: {score} >= {previous}");
        previous = score;
    }
}

#[test]
fn scores_stay_in_bounds_for_distorted_faces() {
    let analyzer = Analyzer::default();
    let faces = [
        reference_face(),
        rotate(&reference_face(), -30.0),
        shift_jaw(&reference_face(), 40.0),
        reference_face().map(|i, p| Point::new(p.x * (1.0 + i as f64 * 0.01), p.y * 1.3)),
    ];
    for face in &faces {
        for gender in Gender::ALL {
            let result = analyzer.analyze(face, gender).unwrap();
            assert!((0.0..=100.0).contains(&result.overall_score));
            for m in &result.metrics {
                assert!((0.0..=100.0).contains(&m.score), "{} = {}", m.id, m.score);
            }
        }
    }
}

#[test]
fn excluding_a_metric_renormalizes_weights() {
    let analyzer = Analyzer::default();
    let result = analyzer.analyze(&reference_face(), Gender::Male).unwrap();
    let engine = ScoringEngine::new(analyzer.tables(), &analyzer.config().scoring);

    let remaining: Vec<_> = result
        .metrics
        .iter()
        .filter(|m| m.id != MetricId::FacialThirds)
        .cloned()
        .collect();
    let weights = engine.normalized_weights(&remaining, Gender::Male).unwrap();
    assert_eq!(weights.len(), MetricId::ALL.len() - 1);
    assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);

    let expected: f64 = remaining.iter().zip(&weights).map(|(m, w)| m.score * w).sum();
    let overall = engine.overall_score(&remaining, Gender::Male).unwrap();
    assert!((overall - expected).abs() < EPS);
}

#[test]
fn standard_tables_cover_every_computed_metric() {
    let tables = ReferenceTables::standard();
    let metrics = compute_metrics(&reference_face()).unwrap();
    for m in &metrics {
        for gender in Gender::ALL {
            assert!(tables.get(m.id, gender).is_ok(), "{} missing for {gender}", m.id);
        }
    }
}

#[test]
fn degenerate_landmarks_are_geometry_errors() {
    let analyzer = Analyzer::default();
    let collapsed = reference_face().map(|_, _| Point::new(50.0, 50.0));
    let err = analyzer.analyze(&collapsed, Gender::Male).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
}
