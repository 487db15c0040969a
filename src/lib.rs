//! # sdvn-eval - Evaluation utility for SDVN attack/mitigation simulations
//!
//! This library aggregates the results of a multi-dimensional SDVN security
//! experiment matrix (attack type × attack intensity × mitigation stage,
//! plus a no-attack baseline) into comparable performance metrics and
//! publication-ready comparison tables.
//!
//! ## Overview
//!
//! Simulation runs write one packet-level CSV per scenario. sdvn-eval
//! resolves each declared scenario to its result directory, reduces the
//! packet records to summary metrics (PDR, delay, estimated throughput,
//! loss rate, attack-indicator counters), and derives baseline-relative
//! degradation, mitigation effectiveness, and attack severity.
//!
//! ## Key Features
//!
//! - **Schema tolerance**: result CSVs vary across experiment generations;
//!   recognized columns are detected per dataset and missing metrics are
//!   zero-filled instead of erroring
//! - **Best-effort sweeps**: a missing or malformed scenario is recorded
//!   and reported, never fatal — partial result trees still produce a
//!   usable report
//! - **Legacy result trees**: directories written by the old numbered test
//!   harness (test02_wormhole_..., test17_combined_...) resolve alongside
//!   the canonical naming scheme
//! - **Reproducible**: deterministic iteration order; re-running over the
//!   same inputs yields identical tables
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `analysis::schema`: recognized-metric capability detection
//! - `analysis::dataset`: packet-level CSV loading
//! - `analysis::summary`: per-scenario metric reduction
//! - `analysis::resolver`: scenario key → result directory resolution
//! - `analysis::matrix`: keyed result matrix store
//! - `analysis::compare`: degradation, effectiveness and severity
//! - `analysis::report`: text/JSON/CSV/LaTeX emission
//! - `config`: experiment matrix and policy configuration
//! - `orchestrator`: the end-to-end evaluation pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sdvn_eval::{config::EvalConfig, orchestrator};
//! use std::path::Path;
//!
//! let config = EvalConfig::default();
//! let (matrix, report) = orchestrator::run_evaluation(
//!     Path::new("./sdvn_evaluation_results"),
//!     &config,
//! )?;
//!
//! // `matrix` supports arbitrary downstream querying; `report` carries the
//! // summary and comparison tables plus the skipped-scenario list.
//! # Ok::<(), sdvn_eval::error::EvalError>(())
//! ```
//!
//! ## Error Handling
//!
//! Per-scenario problems (missing directories, malformed cells) are
//! isolated and reported per scenario. The engine errors out only on
//! invalid configuration; the binary wraps everything in `color_eyre` for
//! contextual reporting.

pub mod analysis;
pub mod config;
pub mod error;
pub mod orchestrator;
