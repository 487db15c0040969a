//! Core data types for the evaluation matrix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Simulation timestamp in seconds (as written by the packet tracker)
pub type SimTime = f64;

/// Attack family under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    /// No attack — reserved for the baseline scenario
    None,
    Wormhole,
    Blackhole,
    Sybil,
    Replay,
    /// Route-table poisoning via fake MHL advertisements
    #[serde(rename = "rtp")]
    RouteTamper,
    /// All attacks active simultaneously
    Combined,
}

impl AttackType {
    /// Canonical lowercase token used in directory names and table rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackType::None => "none",
            AttackType::Wormhole => "wormhole",
            AttackType::Blackhole => "blackhole",
            AttackType::Sybil => "sybil",
            AttackType::Replay => "replay",
            AttackType::RouteTamper => "rtp",
            AttackType::Combined => "combined",
        }
    }
}

impl std::fmt::Display for AttackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "baseline" => Ok(AttackType::None),
            "wormhole" => Ok(AttackType::Wormhole),
            "blackhole" => Ok(AttackType::Blackhole),
            "sybil" => Ok(AttackType::Sybil),
            "replay" => Ok(AttackType::Replay),
            "rtp" | "route_tamper" => Ok(AttackType::RouteTamper),
            "combined" => Ok(AttackType::Combined),
            other => Err(format!("unknown attack type: {other}")),
        }
    }
}

/// Degree of countermeasure applied for a given attack/intensity pair.
///
/// The derived `Ord` gives the stage order used everywhere in reports:
/// no_mitigation, then detection_only, then full_mitigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationStage {
    NoMitigation,
    DetectionOnly,
    FullMitigation,
}

impl MitigationStage {
    pub const ALL: [MitigationStage; 3] = [
        MitigationStage::NoMitigation,
        MitigationStage::DetectionOnly,
        MitigationStage::FullMitigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MitigationStage::NoMitigation => "no_mitigation",
            MitigationStage::DetectionOnly => "detection_only",
            MitigationStage::FullMitigation => "full_mitigation",
        }
    }

    /// Stage token used by the legacy shell harness directory names.
    pub fn legacy_str(&self) -> &'static str {
        match self {
            MitigationStage::NoMitigation => "no_mitigation",
            MitigationStage::DetectionOnly => "with_detection",
            MitigationStage::FullMitigation => "with_mitigation",
        }
    }
}

impl std::fmt::Display for MitigationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical address of one experiment cell: attack type, attack intensity
/// (percent of nodes compromised), and mitigation stage.
///
/// Field order matters: the derived `Ord` sorts by attack, then ascending
/// intensity, then stage order, which is the iteration order of the result
/// matrix and of every generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScenarioKey {
    pub attack: AttackType,
    pub intensity: u32,
    pub stage: MitigationStage,
}

impl ScenarioKey {
    pub fn new(attack: AttackType, intensity: u32, stage: MitigationStage) -> Self {
        Self { attack, intensity, stage }
    }

    /// The unique no-attack reference scenario.
    pub fn baseline() -> Self {
        Self {
            attack: AttackType::None,
            intensity: 0,
            stage: MitigationStage::NoMitigation,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.attack == AttackType::None && self.stage == MitigationStage::NoMitigation
    }

    /// Human-readable label used in report rows, e.g. "wormhole 40% full_mitigation".
    pub fn label(&self) -> String {
        if self.is_baseline() {
            "baseline".to_string()
        } else {
            format!("{} {}% {}", self.attack, self.intensity, self.stage)
        }
    }
}

impl std::fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Per-scenario performance summary reduced from one packet-level dataset.
///
/// `pdr` and `loss_rate` are ratios on a 0..1 scale and always satisfy
/// pdr + loss_rate == 1 when `total_packets > 0`; both are exactly 0 for an
/// empty dataset (explicit zero-fill, never NaN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_packets: u64,
    pub delivered_packets: u64,
    pub pdr: f64,
    /// Mean end-to-end delay over delivered packets only; 0 if none delivered.
    pub avg_delay_ms: f64,
    /// Estimated from delivered-byte volume over the observed time span,
    /// assuming a nominal fixed payload size; 0 if the span is not positive.
    pub throughput_mbps: f64,
    pub loss_rate: f64,
    /// Attack-indicator counters keyed by counter name. A counter is present
    /// only when the source schema carries the corresponding column, so
    /// "not measured" is distinguishable from "measured zero".
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attack_counters: BTreeMap<String, u64>,
}

impl SummaryMetrics {
    /// The all-zero summary returned for an empty dataset.
    pub fn empty() -> Self {
        Self {
            total_packets: 0,
            delivered_packets: 0,
            pdr: 0.0,
            avg_delay_ms: 0.0,
            throughput_mbps: 0.0,
            loss_rate: 0.0,
            attack_counters: BTreeMap::new(),
        }
    }
}

/// What the resolver produced for one scenario key.
///
/// Non-loaded states propagate as "missing" through every comparison and are
/// listed with their reason in the report, never silently zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioData {
    Loaded { metrics: SummaryMetrics },
    /// The resolved location had no usable dataset.
    Missing { path: String },
    /// The dataset existed but failed its own declared schema.
    Failed { error: String },
}

impl ScenarioData {
    pub fn metrics(&self) -> Option<&SummaryMetrics> {
        match self {
            ScenarioData::Loaded { metrics } => Some(metrics),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ScenarioData::Loaded { .. })
    }

    /// Why this scenario is unusable, if it is.
    pub fn skip_reason(&self) -> Option<String> {
        match self {
            ScenarioData::Loaded { .. } => None,
            ScenarioData::Missing { path } => Some(format!("no dataset found at {path}")),
            ScenarioData::Failed { error } => Some(error.clone()),
        }
    }
}

/// Categorical attack-impact label derived from combined PDR-drop and
/// delay-increase fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(s)
    }
}

/// Subject-vs-reference deltas for one pair of summaries.
///
/// Degradation percentages are signed: a subject worse than the reference
/// has a negative pdr/throughput delta and a positive delay delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub pdr_delta: f64,
    pub pdr_delta_pct: f64,
    pub delay_delta_ms: f64,
    pub delay_delta_pct: f64,
    pub throughput_delta_mbps: f64,
    pub throughput_delta_pct: f64,
    pub severity: Severity,
}

/// One comparison-table row: everything known about a single
/// attack type × intensity cell across its mitigation stages.
///
/// `None` in any field means the underlying scenario was missing; the report
/// renders a gap there rather than a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub attack: AttackType,
    pub intensity: u32,
    pub no_mitigation: Option<ComparisonRecord>,
    pub detection_only: Option<ComparisonRecord>,
    pub full_mitigation: Option<ComparisonRecord>,
    /// Fraction of the recoverable PDR gap closed by detection alone.
    pub detection_effectiveness_pct: Option<f64>,
    /// Fraction of the recoverable PDR gap closed by full mitigation.
    pub mitigation_effectiveness_pct: Option<f64>,
    /// Severity of the unmitigated attack relative to baseline.
    pub severity: Option<Severity>,
}

/// A scenario that could not contribute to the matrix, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedScenario {
    pub key: ScenarioKey,
    pub label: String,
    pub reason: String,
}

/// One summary-table row (only scenarios that loaded appear here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummaryRow {
    pub key: ScenarioKey,
    pub label: String,
    pub metrics: SummaryMetrics,
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub results_root: String,
    pub scenarios_declared: usize,
    pub scenarios_loaded: usize,
    pub scenarios_skipped: usize,
}

/// Complete evaluation output handed to the report emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub baseline: Option<SummaryMetrics>,
    pub summaries: Vec<ScenarioSummaryRow>,
    pub comparisons: Vec<ComparisonRow>,
    pub skipped: Vec<SkippedScenario>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_key_ordering() {
        let mut keys = vec![
            ScenarioKey::new(AttackType::Wormhole, 40, MitigationStage::NoMitigation),
            ScenarioKey::new(AttackType::Wormhole, 20, MitigationStage::FullMitigation),
            ScenarioKey::new(AttackType::Blackhole, 100, MitigationStage::NoMitigation),
            ScenarioKey::new(AttackType::Wormhole, 20, MitigationStage::NoMitigation),
        ];
        keys.sort();

        assert_eq!(keys[0].intensity, 20);
        assert_eq!(keys[0].stage, MitigationStage::NoMitigation);
        assert_eq!(keys[1].stage, MitigationStage::FullMitigation);
        assert_eq!(keys[2].intensity, 40);
        // Blackhole sorts after Wormhole by enum declaration order
        assert_eq!(keys[3].attack, AttackType::Blackhole);
    }

    #[test]
    fn test_baseline_key() {
        let key = ScenarioKey::baseline();
        assert!(key.is_baseline());
        assert_eq!(key.label(), "baseline");

        let attacked = ScenarioKey::new(AttackType::Sybil, 60, MitigationStage::DetectionOnly);
        assert!(!attacked.is_baseline());
        assert_eq!(attacked.label(), "sybil 60% detection_only");
    }

    #[test]
    fn test_attack_type_round_trip() {
        for attack in [
            AttackType::Wormhole,
            AttackType::Blackhole,
            AttackType::Sybil,
            AttackType::Replay,
            AttackType::RouteTamper,
            AttackType::Combined,
        ] {
            let parsed: AttackType = attack.as_str().parse().unwrap();
            assert_eq!(parsed, attack);
        }
    }

    #[test]
    fn test_scenario_data_skip_reason() {
        let loaded = ScenarioData::Loaded { metrics: SummaryMetrics::empty() };
        assert!(loaded.skip_reason().is_none());

        let missing = ScenarioData::Missing { path: "/tmp/x".to_string() };
        assert!(missing.skip_reason().unwrap().contains("/tmp/x"));
    }
}
