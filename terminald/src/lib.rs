//! # Terminal Batch Host
//!
//! Runs command streams through the terminal interpreter, one dataset at a
//! time.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The interpreter never prints; the host writes results
//! - **Fresh state per dataset**: No buffer or cursor outlives its dataset
//! - **Explicit failure policy**: Stop on the first rejected dataset, or
//!   isolate it and continue
//! - **Injected logging**: Diagnostics flow through a `LogSink`, never
//!   global flags
//!
//! ## Responsibilities
//!
//! The host:
//! - Validates the dataset count and line-length bounds
//! - Feeds each dataset to a fresh `TerminalCore`
//! - Writes the rendered buffer and a `-` separator per dataset
//! - Loads versioned JSON configuration

pub mod config;
pub mod dataset;
pub mod runtime;

pub use config::{ConfigError, FailurePolicy, TerminalConfig};
pub use dataset::{Dataset, DatasetBounds, DatasetError, DatasetReader};
pub use runtime::{BatchReport, BatchRuntime, DatasetFailure, RuntimeError, DATASET_SEPARATOR};
