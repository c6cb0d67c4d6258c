//! dataforge - knowledge-base extraction and dataset assembly
//!
//! Scans an irregular corpus of decompiled client sources and produces a
//! consistent knowledge base: typed field maps, a categorized command
//! registry, constant tables, deterministic reference data, generated
//! documentation and a data-quality report.
//!
//! # Example Usage
//!
//! ```no_run
//! use dataforge::config::DataforgeConfig;
//! use dataforge::fs::RealFileSystem;
//! use dataforge::pipeline::{Phase, PipelineOrchestrator};
//! use dataforge::search::SearchBackend;
//! use std::sync::Arc;
//!
//! let config = DataforgeConfig::with_dirs("dataset/source_code", "dataset");
//! let orchestrator = PipelineOrchestrator::new(
//!     Arc::new(RealFileSystem::new()),
//!     config,
//!     SearchBackend::unavailable("offline"),
//! );
//! let summary = orchestrator.run(&[Phase::All]);
//! println!("{} phases succeeded", summary.succeeded());
//! ```
//!
//! # Project Structure
//!
//! - [`corpus`]: corpus scan and canonical file resolution
//! - [`extract`]: field, command and constant extraction
//! - [`reference`]: synthesized reference tables
//! - [`quality`]: quality sweeps
//! - [`docs`]: Markdown rendering
//! - [`pipeline`]: phase selection, sequencing and persistence

pub mod catalog;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod docs;
pub mod error;
pub mod extract;
pub mod fs;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod quality;
pub mod reference;
pub mod search;
pub mod util;

pub use config::{ConfigError, DataforgeConfig};
pub use error::{ExtractionError, ExtractionResult};
pub use pipeline::{Phase, PipelineOrchestrator, RunSummary};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
