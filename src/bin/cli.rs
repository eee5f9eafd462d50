//! CLI application for facial harmony scoring.
//!
//! Usage:
//!   harmony-face landmarks.json --gender female          # Human-readable output
//!   harmony-face landmarks.json --gender male --json     # JSON output
//!   harmony-face --demo --gender female -o report.json   # Built-in reference face

use clap::Parser;
use harmony_face::{
    format_metrics, reference_face, AnalysisResult, Analyzer, AnalyzerConfig, Gender,
    LandmarkSet, MetricReport, Point, ReferenceTables,
};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "harmony-face")]
#[command(author, version, about = "Facial harmony scoring from 68-point landmarks", long_about = None)]
struct Args {
    /// JSON file with 68 landmark points
    #[arg(required_unless_present = "demo")]
    landmarks: Option<PathBuf>,

    /// Reference gender: male or female
    #[arg(short, long)]
    gender: String,

    /// Analyze the built-in frontal reference face instead of a file
    #[arg(long, conflicts_with = "landmarks")]
    demo: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reference table JSON file (default: built-in table)
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Analyzer config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum head roll in degrees before the capture is flagged
    #[arg(long)]
    max_roll: Option<f64>,

    /// Maximum yaw proxy before the capture is flagged
    #[arg(long)]
    max_yaw: Option<f64>,

    /// Minimum inter-pupillary distance in pixels
    #[arg(long)]
    min_ipd: Option<f64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Accepted shapes for a single landmark in the input file.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointInput {
    Object { x: f64, y: f64 },
    Pair([f64; 2]),
}

impl From<PointInput> for Point {
    fn from(p: PointInput) -> Self {
        match p {
            PointInput::Object { x, y } => Point::new(x, y),
            PointInput::Pair([x, y]) => Point::new(x, y),
        }
    }
}

/// Either a bare array of points or an object with a `landmarks` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum LandmarkFile {
    Bare(Vec<PointInput>),
    Wrapped { landmarks: Vec<PointInput> },
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output<'a> {
    source: String,
    gender: Gender,
    #[serde(flatten)]
    result: &'a AnalysisResult,
    report: Vec<MetricReport>,
}

fn main() {
    let args = Args::parse();

    init_logging(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(default_filter: LevelFilter) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter.as_str()),
    );
    if builder.try_init().is_err() {
        // Logger already initialized; nothing to do.
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let gender: Gender = args.gender.parse()?;

    let tables = match &args.reference {
        Some(path) => {
            info!("Loading reference tables from {:?}", path);
            ReferenceTables::load(path)?
        }
        None => ReferenceTables::standard(),
    };

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(v) = args.max_roll {
        config.quality.max_roll_degrees = v;
    }
    if let Some(v) = args.max_yaw {
        config.quality.max_yaw_proxy = v;
    }
    if let Some(v) = args.min_ipd {
        config.quality.min_interpupillary_pixels = v;
    }
    let analyzer = Analyzer::new(tables, config)?;

    let (source, landmarks) = match &args.landmarks {
        Some(path) => (path.display().to_string(), load_landmarks(path)?),
        None => ("reference face".to_string(), reference_face()),
    };
    info!("Analyzing {} ({})", source, gender);

    let result = analyzer.analyze(&landmarks, gender)?;
    let report = format_metrics(&result.metrics, analyzer.tables(), gender)?;

    let output = Output {
        source,
        gender,
        result: &result,
        report,
    };

    // Generate output
    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    // Write output
    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn load_landmarks(path: &Path) -> Result<LandmarkSet, Box<dyn std::error::Error>> {
    info!("Loading landmarks from {:?}", path);
    let json = std::fs::read_to_string(path)?;
    let points = match serde_json::from_str::<LandmarkFile>(&json)? {
        LandmarkFile::Bare(points) | LandmarkFile::Wrapped { landmarks: points } => points,
    };
    let points: Vec<Point> = points.into_iter().map(Point::from).collect();
    Ok(LandmarkSet::new(points)?)
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();
    let result = output.result;
    let quality = &result.quality;

    s.push_str(&format!("Source: {} ({})\n", output.source, output.gender));
    s.push_str(&format!("Overall score: {:.0}/100\n", result.overall_score));

    s.push_str("\nCapture quality:\n");
    s.push_str(&format!("  Roll: {:.1}°\n", quality.roll_degrees));
    s.push_str(&format!("  Yaw:  {:.3}\n", quality.yaw_proxy));
    s.push_str(&format!("  IPD:  {:.0} px\n", quality.interpupillary_distance_pixels));
    if quality.acceptable {
        s.push_str("  Acceptable\n");
    } else {
        s.push_str("  Unreliable capture, scores are approximate:\n");
        for issue in &quality.issues {
            s.push_str(&format!("    - {}\n", issue.description()));
        }
    }

    s.push_str("\nMetrics:\n");
    for row in &output.report {
        s.push_str(&format!(
            "  {:<30} {:>10}  ideal {:<18} {:>3}/100\n",
            row.label, row.value, row.ideal, row.score
        ));
    }

    s.push_str(&format!("\n{}\n", result.summary));
    s
}
