//! Packet summary calculation.
//!
//! Reduces one packet-level dataset to a `SummaryMetrics` record. The
//! reduction is pure: no I/O, no shared state, deterministic for a given
//! dataset and capability set.

use std::collections::BTreeMap;

use crate::analysis::dataset::Dataset;
use crate::analysis::schema::{CapabilitySet, MetricColumn};
use crate::analysis::types::SummaryMetrics;
use crate::error::EvalError;

/// Reduce a dataset to its summary metrics.
///
/// Metrics whose columns are absent from `caps` are zero-filled (or, for
/// attack counters, omitted). A malformed cell in a column the dataset
/// itself declares is a `DataQuality` error that fails the whole summary;
/// silently coercing bad cells would bias the averages.
pub fn summarize(
    dataset: &Dataset,
    caps: &CapabilitySet,
    payload_bytes: u64,
) -> Result<SummaryMetrics, EvalError> {
    let total_packets = dataset.len() as u64;
    if total_packets == 0 {
        return Ok(SummaryMetrics::empty());
    }

    let delivered_flags = if caps.can_compute_delivery() {
        Some(parse_delivered_flags(dataset)?)
    } else {
        None
    };

    let delivered_packets = delivered_flags
        .as_ref()
        .map(|flags| flags.iter().filter(|&&d| d).count() as u64)
        .unwrap_or(0);

    // Degraded-data policy: without a Delivered column both ratios stay 0.
    let (pdr, loss_rate) = if delivered_flags.is_some() {
        let pdr = delivered_packets as f64 / total_packets as f64;
        (pdr, 1.0 - pdr)
    } else {
        (0.0, 0.0)
    };

    let avg_delay_ms = if caps.can_compute_delay() {
        mean_delivered_delay(dataset, delivered_flags.as_deref().unwrap_or(&[]))?
    } else {
        0.0
    };

    let throughput_mbps = if caps.can_compute_throughput() {
        estimate_throughput(dataset, delivered_packets, payload_bytes)
    } else {
        0.0
    };

    let mut attack_counters = BTreeMap::new();
    for indicator in caps.attack_indicators() {
        let count = sum_indicator(dataset, indicator)?;
        // counter_name is Some for every indicator column
        if let Some(name) = indicator.counter_name() {
            attack_counters.insert(name.to_string(), count);
        }
    }

    Ok(SummaryMetrics {
        total_packets,
        delivered_packets,
        pdr,
        avg_delay_ms,
        throughput_mbps,
        loss_rate,
        attack_counters,
    })
}

/// Parse the Delivered column into per-row flags.
fn parse_delivered_flags(dataset: &Dataset) -> Result<Vec<bool>, EvalError> {
    let column = MetricColumn::Delivered.column_name();
    let mut flags = Vec::with_capacity(dataset.len());

    for (row_idx, row) in dataset.rows().iter().enumerate() {
        let raw = dataset.cell(row, column).unwrap_or("");
        let flag = match raw.trim() {
            "1" => true,
            "0" => false,
            other if other.eq_ignore_ascii_case("true") => true,
            other if other.eq_ignore_ascii_case("false") => false,
            other => {
                return Err(EvalError::DataQuality {
                    row: row_idx + 1,
                    column: column.to_string(),
                    value: other.to_string(),
                })
            }
        };
        flags.push(flag);
    }

    Ok(flags)
}

/// Mean delay over the delivered subset only.
///
/// Dropped packets never received a delay; including them (as zero or as a
/// sentinel) would bias the mean downward, so they are excluded outright.
/// A delivered row with a non-numeric delay is a data-quality failure.
fn mean_delivered_delay(dataset: &Dataset, delivered: &[bool]) -> Result<f64, EvalError> {
    let column = MetricColumn::DelayMs.column_name();
    let mut sum = 0.0;
    let mut count = 0u64;

    for (row_idx, row) in dataset.rows().iter().enumerate() {
        if !delivered.get(row_idx).copied().unwrap_or(false) {
            continue;
        }
        let raw = dataset.cell(row, column).unwrap_or("");
        let delay: f64 = raw.trim().parse().map_err(|_| EvalError::DataQuality {
            row: row_idx + 1,
            column: column.to_string(),
            value: raw.to_string(),
        })?;
        if !delay.is_finite() {
            return Err(EvalError::DataQuality {
                row: row_idx + 1,
                column: column.to_string(),
                value: raw.to_string(),
            });
        }
        sum += delay;
        count += 1;
    }

    if count == 0 {
        Ok(0.0)
    } else {
        Ok(sum / count as f64)
    }
}

/// Estimate throughput from delivered packet count over the observed span.
///
/// The span is max(ReceiveTime) − min(SendTime) over the whole dataset.
/// Undelivered rows carry a negative receive-time sentinel, and the columns
/// occasionally hold blanks, so time cells are parsed leniently: anything
/// that is not a non-negative finite number simply does not contribute to
/// the span. The 512-byte nominal payload stands in for true byte
/// accounting and is configurable.
fn estimate_throughput(dataset: &Dataset, delivered_packets: u64, payload_bytes: u64) -> f64 {
    let send_col = MetricColumn::SendTime.column_name();
    let recv_col = MetricColumn::ReceiveTime.column_name();

    let mut min_send: Option<f64> = None;
    let mut max_recv: Option<f64> = None;

    for row in dataset.rows() {
        if let Some(send) = parse_time(dataset.cell(row, send_col)) {
            min_send = Some(min_send.map_or(send, |m: f64| m.min(send)));
        }
        if let Some(recv) = parse_time(dataset.cell(row, recv_col)) {
            max_recv = Some(max_recv.map_or(recv, |m: f64| m.max(recv)));
        }
    }

    let duration = match (min_send, max_recv) {
        (Some(start), Some(end)) => end - start,
        _ => return 0.0,
    };
    if duration <= 0.0 {
        return 0.0;
    }

    let total_bits = (delivered_packets * payload_bytes * 8) as f64;
    total_bits / (duration * 1_000_000.0)
}

fn parse_time(cell: Option<&str>) -> Option<f64> {
    let value: f64 = cell?.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Sum an attack-indicator column into a counter.
fn sum_indicator(dataset: &Dataset, indicator: MetricColumn) -> Result<u64, EvalError> {
    let column = indicator.column_name();
    let mut sum = 0.0f64;

    for (row_idx, row) in dataset.rows().iter().enumerate() {
        let raw = dataset.cell(row, column).unwrap_or("");
        let value: f64 = raw.trim().parse().map_err(|_| EvalError::DataQuality {
            row: row_idx + 1,
            column: column.to_string(),
            value: raw.to_string(),
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(EvalError::DataQuality {
                row: row_idx + 1,
                column: column.to_string(),
                value: raw.to_string(),
            });
        }
        sum += value;
    }

    Ok(sum as u64)
}
