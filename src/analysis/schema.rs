//! Metric schema detection.
//!
//! Result CSVs vary across experiment generations: some carry only the basic
//! delivery columns, some carry per-attack indicator columns, and a few are
//! pre-aggregated per-run exports. Instead of demanding one fixed schema, the
//! calculator asks this module which recognized columns a dataset actually
//! has and degrades gracefully around the rest.

use std::collections::BTreeSet;

/// The recognized metric column vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricColumn {
    Delivered,
    DelayMs,
    SendTime,
    ReceiveTime,
    WormholeOnPath,
    BlackholeOnPath,
    ReplayDetected,
    PacketsReplayed,
    FakeMhlAdvertisements,
    RouteValidationFailures,
}

impl MetricColumn {
    pub const ALL: [MetricColumn; 10] = [
        MetricColumn::Delivered,
        MetricColumn::DelayMs,
        MetricColumn::SendTime,
        MetricColumn::ReceiveTime,
        MetricColumn::WormholeOnPath,
        MetricColumn::BlackholeOnPath,
        MetricColumn::ReplayDetected,
        MetricColumn::PacketsReplayed,
        MetricColumn::FakeMhlAdvertisements,
        MetricColumn::RouteValidationFailures,
    ];

    /// The exact header name as written by the simulation's packet tracker.
    pub fn column_name(&self) -> &'static str {
        match self {
            MetricColumn::Delivered => "Delivered",
            MetricColumn::DelayMs => "DelayMs",
            MetricColumn::SendTime => "SendTime",
            MetricColumn::ReceiveTime => "ReceiveTime",
            MetricColumn::WormholeOnPath => "WormholeOnPath",
            MetricColumn::BlackholeOnPath => "BlackholeOnPath",
            MetricColumn::ReplayDetected => "ReplayDetected",
            MetricColumn::PacketsReplayed => "PacketsReplayed",
            MetricColumn::FakeMhlAdvertisements => "FakeMHLAdvertisements",
            MetricColumn::RouteValidationFailures => "RouteValidationFailures",
        }
    }

    /// Counter name under which an attack-indicator column is summed into
    /// `SummaryMetrics::attack_counters`. `None` for non-indicator columns.
    pub fn counter_name(&self) -> Option<&'static str> {
        match self {
            MetricColumn::WormholeOnPath => Some("wormhole_affected_packets"),
            MetricColumn::BlackholeOnPath => Some("blackhole_affected_packets"),
            MetricColumn::ReplayDetected => Some("replay_detected_packets"),
            MetricColumn::PacketsReplayed => Some("packets_replayed"),
            MetricColumn::FakeMhlAdvertisements => Some("fake_mhl_advertisements"),
            MetricColumn::RouteValidationFailures => Some("route_validation_failures"),
            _ => None,
        }
    }

    pub fn is_attack_indicator(&self) -> bool {
        self.counter_name().is_some()
    }
}

/// The subset of the recognized vocabulary a dataset satisfies.
///
/// An empty set is a valid answer; downstream stages zero-fill the metrics
/// they cannot compute rather than erroring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    columns: BTreeSet<MetricColumn>,
}

impl CapabilitySet {
    pub fn has(&self, column: MetricColumn) -> bool {
        self.columns.contains(&column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// The attack-indicator capabilities present, in stable order.
    pub fn attack_indicators(&self) -> impl Iterator<Item = MetricColumn> + '_ {
        self.columns.iter().copied().filter(MetricColumn::is_attack_indicator)
    }

    /// True when PDR can be computed at all.
    pub fn can_compute_delivery(&self) -> bool {
        self.has(MetricColumn::Delivered)
    }

    pub fn can_compute_delay(&self) -> bool {
        self.has(MetricColumn::Delivered) && self.has(MetricColumn::DelayMs)
    }

    pub fn can_compute_throughput(&self) -> bool {
        self.has(MetricColumn::Delivered)
            && self.has(MetricColumn::SendTime)
            && self.has(MetricColumn::ReceiveTime)
    }
}

impl FromIterator<MetricColumn> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = MetricColumn>>(iter: T) -> Self {
        Self { columns: iter.into_iter().collect() }
    }
}

/// Determine which recognized metric columns are present in a header set.
///
/// Pure and infallible: unrecognized columns are ignored, and a dataset with
/// no recognized columns yields an empty capability set.
pub fn detect_capabilities<S: AsRef<str>>(headers: &[S]) -> CapabilitySet {
    MetricColumn::ALL
        .iter()
        .copied()
        .filter(|col| headers.iter().any(|h| h.as_ref() == col.column_name()))
        .collect()
}
