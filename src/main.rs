// src/main.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colorful::Colorful;
use walkdir::WalkDir;

use platescan::cli::args::Args;
use platescan::cli::output;
use platescan::config::{CriticalityTable, RecommendationTemplates, WeightTable};
use platescan::detectors::DetectorRegistry;
use platescan::{FoodAnalyzer, FoodImage, HealthProfile, SafetyLevel};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let analyzer = build_analyzer(&args)?;
    let profile = if args.conditions.is_empty() {
        None
    } else {
        Some(HealthProfile::new(
            args.conditions.iter().map(|&c| c.into()).collect(),
        ))
    };

    let image_files = collect_image_files(&args.input)?;
    if image_files.is_empty() {
        println!("{}", "No images found!".red());
        return Ok(());
    }

    let mut levels: Vec<SafetyLevel> = Vec::new();
    for file_path in &image_files {
        let image = load_image(file_path)
            .with_context(|| format!("failed to load {}", file_path.display()))?;
        let report = analyzer.analyze(image, profile.as_ref()).await?;

        if args.json {
            println!("{}", output::format_json(&report)?);
        } else {
            let name = file_path.display().to_string();
            println!("{}", output::format_report(&report, &name, args.verbose));
        }
        levels.push(report.verdict.safety_level);
    }

    if !args.json && levels.len() > 1 {
        println!("{}", output::format_summary(&levels));
    }

    Ok(())
}

fn build_analyzer(args: &Args) -> Result<FoodAnalyzer> {
    let mut builder = FoodAnalyzer::builder()
        .detector_timeout(Duration::from_secs(args.timeout_secs))
        .max_recommendations(args.max_recommendations);

    if let Some(deadline) = args.deadline_secs {
        builder = builder.request_deadline(Duration::from_secs(deadline));
    }
    if let Some(path) = &args.weights {
        let weights = WeightTable::from_path(path)
            .with_context(|| format!("invalid weight table {}", path.display()))?;
        builder = builder.registry(DetectorRegistry::with_weights(&weights));
    }
    if let Some(path) = &args.criticality {
        let table = CriticalityTable::from_path(path)
            .with_context(|| format!("invalid criticality table {}", path.display()))?;
        builder = builder.criticality_table(table);
    }
    if let Some(path) = &args.templates {
        let templates = RecommendationTemplates::from_path(path)
            .with_context(|| format!("invalid templates {}", path.display()))?;
        builder = builder.recommendation_templates(templates);
    }

    builder.build().context("engine configuration invalid")
}

fn collect_image_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let image_extensions = ["jpg", "jpeg", "png", "bmp", "webp"];

    if path.is_file() {
        if has_extension(path, &image_extensions) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().is_file() && has_extension(entry.path(), &image_extensions) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode an image file to the engine's RGB8 handle. Decoding is the
/// CLI's duty; the engine itself only validates the decoded buffer.
fn load_image(path: &Path) -> Result<FoodImage> {
    let decoded = image::open(path)?.to_rgb8();
    let (width, height) = decoded.dimensions();
    Ok(FoodImage::from_rgb8(width, height, decoded.into_raw())?)
}
