//! Report generation for the evaluation matrix.
//!
//! Pure consumers of the evaluation output: JSON, human-readable text,
//! CSV tables, and publication LaTeX tables. Missing scenarios render as
//! gaps ("-"), never as zeros.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use crate::analysis::types::{ComparisonRecord, EvaluationReport};

/// Generate JSON report
pub fn generate_json_report(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Generate human-readable text report
pub fn generate_text_report(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                   SDVN ATTACK/MITIGATION EVALUATION".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Results Root: {}", report.metadata.results_root));
    lines.push(format!(
        "Scenarios: {} declared, {} loaded, {} skipped",
        report.metadata.scenarios_declared,
        report.metadata.scenarios_loaded,
        report.metadata.scenarios_skipped
    ));
    lines.push(String::new());

    // Baseline
    lines.push("-".repeat(80));
    lines.push("BASELINE PERFORMANCE".to_string());
    lines.push("-".repeat(80));
    match &report.baseline {
        Some(baseline) => {
            lines.push(format!("PDR: {:.2}%", baseline.pdr * 100.0));
            lines.push(format!("Avg Delay: {:.2} ms", baseline.avg_delay_ms));
            lines.push(format!("Throughput: {:.4} Mbps", baseline.throughput_mbps));
            lines.push(format!("Total Packets: {}", baseline.total_packets));
            lines.push(format!("Delivered: {}", baseline.delivered_packets));
        }
        None => {
            lines.push("Baseline scenario missing; degradation columns are unavailable.".to_string());
        }
    }
    lines.push(String::new());

    // Per-scenario summary table
    lines.push("-".repeat(80));
    lines.push("SCENARIO SUMMARY".to_string());
    lines.push("-".repeat(80));
    lines.push(format!(
        "{:<36} {:>8} {:>10} {:>12} {:>10}",
        "Scenario", "PDR %", "Delay ms", "Tput Mbps", "Packets"
    ));
    for row in &report.summaries {
        lines.push(format!(
            "{:<36} {:>8.2} {:>10.2} {:>12.4} {:>10}",
            row.label,
            row.metrics.pdr * 100.0,
            row.metrics.avg_delay_ms,
            row.metrics.throughput_mbps,
            row.metrics.total_packets
        ));
    }
    lines.push(String::new());

    // Comparison table
    lines.push("-".repeat(80));
    lines.push("ATTACK IMPACT AND MITIGATION EFFECTIVENESS".to_string());
    lines.push("-".repeat(80));
    lines.push(format!(
        "{:<12} {:>6} {:>12} {:>12} {:>12} {:>10}",
        "Attack", "Int %", "PDR deg %", "Detect eff", "Full eff", "Severity"
    ));
    for row in &report.comparisons {
        lines.push(format!(
            "{:<12} {:>6} {:>12} {:>12} {:>12} {:>10}",
            row.attack.to_string(),
            row.intensity,
            fmt_opt(row.no_mitigation.as_ref().map(|r| r.pdr_delta_pct)),
            fmt_opt(row.detection_effectiveness_pct),
            fmt_opt(row.mitigation_effectiveness_pct),
            row.severity.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        ));
    }
    lines.push(String::new());

    // Skipped scenarios: the gaps must be visible, not silent
    if !report.skipped.is_empty() {
        lines.push("-".repeat(80));
        lines.push("SKIPPED SCENARIOS".to_string());
        lines.push("-".repeat(80));
        for skip in &report.skipped {
            lines.push(format!("{:<36} {}", skip.label, skip.reason));
        }
        lines.push(String::new());
    }

    // Footer
    lines.push("=".repeat(80));

    let content = lines.join("\n");
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Write the per-scenario summary table as CSV.
pub fn write_summary_csv(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    writer.write_record([
        "Scenario",
        "Attack",
        "Intensity",
        "Stage",
        "Total_Packets",
        "Delivered_Packets",
        "Avg_PDR",
        "Avg_Delay_ms",
        "Avg_Throughput_Mbps",
        "Packet_Loss_Rate",
    ])?;

    for row in &report.summaries {
        writer.write_record([
            row.label.clone(),
            row.key.attack.to_string(),
            row.key.intensity.to_string(),
            row.key.stage.to_string(),
            row.metrics.total_packets.to_string(),
            row.metrics.delivered_packets.to_string(),
            format!("{:.6}", row.metrics.pdr),
            format!("{:.4}", row.metrics.avg_delay_ms),
            format!("{:.6}", row.metrics.throughput_mbps),
            format!("{:.6}", row.metrics.loss_rate),
        ])?;
    }

    writer.flush()?;
    log::info!("Summary table written to {}", output_path.display());
    Ok(())
}

fn csv_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}

/// Write the attack-impact comparison table as CSV. Missing cells stay
/// empty so a downstream reader cannot mistake them for measured zeros.
pub fn write_comparison_csv(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;

    writer.write_record([
        "Attack",
        "Intensity",
        "PDR_Degradation_%",
        "Delay_Increase_%",
        "Throughput_Degradation_%",
        "Detection_Effectiveness_%",
        "Mitigation_Effectiveness_%",
        "Attack_Severity",
    ])?;

    for row in &report.comparisons {
        let unmitigated: Option<&ComparisonRecord> = row.no_mitigation.as_ref();
        writer.write_record([
            row.attack.to_string(),
            row.intensity.to_string(),
            csv_opt(unmitigated.map(|r| r.pdr_delta_pct)),
            csv_opt(unmitigated.map(|r| r.delay_delta_pct)),
            csv_opt(unmitigated.map(|r| r.throughput_delta_pct)),
            csv_opt(row.detection_effectiveness_pct),
            csv_opt(row.mitigation_effectiveness_pct),
            row.severity.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    log::info!("Comparison table written to {}", output_path.display());
    Ok(())
}

/// Generate LaTeX tables for publication
pub fn write_latex_tables(report: &EvaluationReport, output_path: &Path) -> Result<()> {
    let mut out = String::new();

    out.push_str("% LaTeX Tables for SDVN Attack/Mitigation Evaluation\n");
    out.push_str(&format!("% Generated: {}\n\n", report.metadata.generated_at));

    // Table 1: PDR degradation, no mitigation vs full mitigation
    out.push_str("\\begin{table}[htbp]\n\\centering\n");
    out.push_str("\\caption{PDR Degradation (\\%): No Mitigation vs Full Mitigation}\n");
    out.push_str("\\label{tab:pdr_comparison}\n");
    out.push_str("\\begin{tabular}{llrr}\n\\hline\n");
    out.push_str("Attack & Intensity & No Mitigation & Full Mitigation \\\\\n\\hline\n");
    for row in &report.comparisons {
        out.push_str(&format!(
            "{} & {}\\% & {} & {} \\\\\n",
            row.attack,
            row.intensity,
            latex_opt(row.no_mitigation.as_ref().map(|r| r.pdr_delta_pct)),
            latex_opt(row.full_mitigation.as_ref().map(|r| r.pdr_delta_pct)),
        ));
    }
    out.push_str("\\hline\n\\end{tabular}\n\\end{table}\n\n");

    // Table 2: mitigation effectiveness
    out.push_str("\\begin{table}[htbp]\n\\centering\n");
    out.push_str("\\caption{Mitigation Effectiveness (\\%) Across Attack Intensities}\n");
    out.push_str("\\label{tab:mitigation_effectiveness}\n");
    out.push_str("\\begin{tabular}{llrr}\n\\hline\n");
    out.push_str("Attack & Intensity & Detection & Full \\\\\n\\hline\n");
    for row in &report.comparisons {
        out.push_str(&format!(
            "{} & {}\\% & {} & {} \\\\\n",
            row.attack,
            row.intensity,
            latex_opt(row.detection_effectiveness_pct),
            latex_opt(row.mitigation_effectiveness_pct),
        ));
    }
    out.push_str("\\hline\n\\end{tabular}\n\\end{table}\n");

    fs::write(output_path, out)
        .with_context(|| format!("Failed to write LaTeX tables to {}", output_path.display()))?;

    log::info!("LaTeX tables written to {}", output_path.display());
    Ok(())
}

fn latex_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string())
}

/// Print a summary to stdout
pub fn print_summary(report: &EvaluationReport) {
    println!("\n=== SDVN EVALUATION SUMMARY ===\n");
    println!(
        "Scenarios: {} loaded / {} declared ({} skipped)",
        report.metadata.scenarios_loaded,
        report.metadata.scenarios_declared,
        report.metadata.scenarios_skipped
    );

    if let Some(baseline) = &report.baseline {
        println!("\nBaseline:");
        println!("  PDR: {:.2}%", baseline.pdr * 100.0);
        println!("  Avg delay: {:.2} ms", baseline.avg_delay_ms);
        println!("  Throughput: {:.4} Mbps", baseline.throughput_mbps);
    } else {
        println!("\nBaseline: MISSING");
    }

    for row in &report.comparisons {
        if let Some(severity) = row.severity {
            println!(
                "  {} {}%: severity {}, full mitigation recovers {}",
                row.attack,
                row.intensity,
                severity,
                fmt_opt(row.mitigation_effectiveness_pct)
            );
        }
    }

    if !report.skipped.is_empty() {
        println!("\nSkipped scenarios:");
        for skip in report.skipped.iter().take(10) {
            println!("  {} ({})", skip.label, skip.reason);
        }
        if report.skipped.len() > 10 {
            println!("  ... and {} more", report.skipped.len() - 10);
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{
        AttackType, ComparisonRow, MitigationStage, ReportMetadata, ScenarioKey,
        ScenarioSummaryRow, SkippedScenario, SummaryMetrics,
    };

    fn sample_report() -> EvaluationReport {
        let baseline = SummaryMetrics {
            total_packets: 100,
            delivered_packets: 99,
            pdr: 0.99,
            avg_delay_ms: 10.0,
            throughput_mbps: 1.5,
            loss_rate: 0.01,
            attack_counters: Default::default(),
        };
        let key = ScenarioKey::new(AttackType::Wormhole, 40, MitigationStage::NoMitigation);
        EvaluationReport {
            metadata: ReportMetadata {
                generated_at: "2025-11-06T12:00:00Z".to_string(),
                results_root: "/tmp/results".to_string(),
                scenarios_declared: 3,
                scenarios_loaded: 2,
                scenarios_skipped: 1,
            },
            baseline: Some(baseline.clone()),
            summaries: vec![
                ScenarioSummaryRow {
                    key: ScenarioKey::baseline(),
                    label: "baseline".to_string(),
                    metrics: baseline,
                },
                ScenarioSummaryRow {
                    key,
                    label: key.label(),
                    metrics: SummaryMetrics {
                        total_packets: 100,
                        delivered_packets: 60,
                        pdr: 0.6,
                        avg_delay_ms: 25.0,
                        throughput_mbps: 0.9,
                        loss_rate: 0.4,
                        attack_counters: Default::default(),
                    },
                },
            ],
            comparisons: vec![ComparisonRow {
                attack: AttackType::Wormhole,
                intensity: 40,
                no_mitigation: None,
                detection_only: None,
                full_mitigation: None,
                detection_effectiveness_pct: None,
                mitigation_effectiveness_pct: Some(75.0),
                severity: None,
            }],
            skipped: vec![SkippedScenario {
                key: ScenarioKey::new(AttackType::Wormhole, 40, MitigationStage::FullMitigation),
                label: "wormhole 40% full_mitigation".to_string(),
                reason: "no dataset found at /tmp/results/wormhole_40_full_mitigation".to_string(),
            }],
        }
    }

    #[test]
    fn test_text_report_lists_skipped_scenarios() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        generate_text_report(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("SKIPPED SCENARIOS"));
        assert!(content.contains("wormhole 40% full_mitigation"));
        assert!(content.contains("no dataset found"));
    }

    #[test]
    fn test_comparison_csv_leaves_missing_cells_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attack_impact_comparison.csv");
        write_comparison_csv(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Attack,Intensity,"));
        let row = lines.next().unwrap();
        // Missing degradation fields are empty, effectiveness is present
        assert!(row.starts_with("wormhole,40,,,,"));
        assert!(row.contains("75.0000"));
    }

    #[test]
    fn test_summary_csv_round_trips_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary_statistics.csv");
        write_summary_csv(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("baseline,none,0,no_mitigation,100,99,0.990000"));
        assert!(content.contains("wormhole 40% no_mitigation,wormhole,40,no_mitigation"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = sample_report();
        generate_json_report(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: EvaluationReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_latex_tables_render_gaps_as_dashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latex_tables.tex");
        write_latex_tables(&sample_report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\\begin{table}"));
        assert!(content.contains("wormhole & 40\\% & - & -"));
        assert!(content.contains("75.0"));
    }
}
