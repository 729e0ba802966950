//! Output formatting for CLI results

use crate::config::AlertSeverity;
use crate::core::{AnalysisReport, SafetyLevel};
use crate::detection::DetectorStatus;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn level_color(level: SafetyLevel) -> &'static str {
    match level {
        SafetyLevel::Excellent | SafetyLevel::Good => "\x1b[32m", // green
        SafetyLevel::Acceptable => "\x1b[36m",                    // cyan
        SafetyLevel::Concerning => "\x1b[33m",                    // yellow
        SafetyLevel::Dangerous | SafetyLevel::Unsafe => "\x1b[31m", // red
    }
}

fn severity_color(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Critical => "\x1b[31m", // red
        AlertSeverity::High => "\x1b[33m",     // yellow
        AlertSeverity::Medium => "\x1b[36m",   // cyan
    }
}

/// Format an analysis report for terminal output.
pub fn format_report(report: &AnalysisReport, file_name: &str, verbose: bool) -> String {
    let mut output = String::new();

    let level = report.verdict.safety_level;
    output.push_str(&format!(
        "{}{}{} {}safety {}/100 ({}){}\n",
        BOLD,
        file_name,
        RESET,
        level_color(level),
        report.verdict.score,
        level,
        RESET,
    ));

    if !report.alerts.is_empty() {
        output.push_str("\n  Alerts:\n");
        for alert in &report.alerts {
            output.push_str(&format!(
                "    {}{} [{}] {}{}\n      {}→ {}{}\n",
                severity_color(alert.severity),
                alert.severity.symbol(),
                alert.severity,
                alert.message,
                RESET,
                DIM,
                alert.action,
                RESET,
            ));
        }
    }

    output.push_str("\n  Detectors:\n");
    for (id, summary) in &report.per_detector {
        let marker = match summary.status {
            DetectorStatus::Ok => "",
            DetectorStatus::Fallback => " [fallback]",
            DetectorStatus::Error => " [error]",
        };
        output.push_str(&format!(
            "    {:<22} {:>3}/100  {}{}{}\n",
            summary.title,
            summary.score,
            DIM,
            format!("{}{}", summary.headline, marker),
            RESET,
        ));
        if verbose {
            output.push_str(&format!(
                "      {}id: {} | confidence: {:.0}%{}\n",
                DIM,
                id,
                summary.confidence * 100.0,
                RESET
            ));
            for finding in &summary.findings {
                output.push_str(&format!("      {}{}{}\n", DIM, finding, RESET));
            }
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\n  Recommendations:\n");
        for rec in &report.recommendations {
            let tag = if rec.personalized {
                format!("{}[for you]{} ", BOLD, RESET)
            } else {
                String::new()
            };
            output.push_str(&format!("    • {}{}\n", tag, rec.text));
        }
    }

    if !report.health_insights.is_empty() {
        output.push_str("\n  Health insights:\n");
        for insight in &report.health_insights {
            output.push_str(&format!("    {}{}{}\n", DIM, insight, RESET));
        }
    }

    output
}

/// Format an analysis report as pretty-printed JSON.
pub fn format_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Summary line for multi-file runs: count per safety band.
pub fn format_summary(levels: &[SafetyLevel]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}Summary:{} {} image(s) analyzed\n", BOLD, RESET, levels.len()));

    for band in [
        SafetyLevel::Excellent,
        SafetyLevel::Good,
        SafetyLevel::Acceptable,
        SafetyLevel::Concerning,
        SafetyLevel::Dangerous,
        SafetyLevel::Unsafe,
    ] {
        let count = levels.iter().filter(|&&l| l == band).count();
        if count > 0 {
            output.push_str(&format!(
                "  {}{} {}{}\n",
                level_color(band),
                count,
                band,
                RESET
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectorId, WeightTable};
    use crate::core::{assemble, compute_overall_score};
    use crate::detection::{Detection, DetectorResult, DetectorResultSet, DetectorSignal};

    fn sample_report() -> AnalysisReport {
        let mut results = DetectorResultSet::new();
        results.insert(DetectorResult::ok(
            DetectorId::Spoilage,
            Detection::new(DetectorSignal::class("fresh"), 0.9, 95.0),
        ));
        results.insert(DetectorResult::fallback(DetectorId::BurntFood, "timed out"));
        let verdict = compute_overall_score(&results, &WeightTable::builtin());
        assemble(&results, verdict, vec![], vec![], vec![])
    }

    #[test]
    fn test_format_report_marks_fallback() {
        let report = sample_report();
        let output = format_report(&report, "dinner.jpg", false);
        assert!(output.contains("dinner.jpg"));
        assert!(output.contains("[fallback]"));
        assert!(output.contains("Spoilage"));
    }

    #[test]
    fn test_format_json_contains_status() {
        let report = sample_report();
        let json = format_json(&report).unwrap();
        assert!(json.contains("\"status\": \"fallback\""));
        assert!(json.contains("\"safety_level\""));
    }

    #[test]
    fn test_summary_counts_bands() {
        let summary = format_summary(&[
            SafetyLevel::Good,
            SafetyLevel::Good,
            SafetyLevel::Unsafe,
        ]);
        assert!(summary.contains("3 image(s)"));
        assert!(summary.contains("2"));
    }
}
