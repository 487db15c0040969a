//! Evaluation engine for SDVN attack/mitigation experiments.
//!
//! This module turns raw per-packet result CSVs into per-scenario summary
//! metrics, a keyed result matrix, and baseline/no-mitigation comparison
//! tables.

pub mod types;
pub mod schema;
pub mod dataset;
pub mod summary;
pub mod resolver;
pub mod matrix;
pub mod compare;
pub mod report;

pub use types::*;
pub use schema::{detect_capabilities, CapabilitySet, MetricColumn};
pub use summary::summarize;
pub use resolver::ScenarioResolver;
pub use matrix::ResultMatrix;
pub use compare::{build_comparison_rows, mitigation_effectiveness};
pub use report::{generate_json_report, generate_text_report};
