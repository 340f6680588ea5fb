//! Runtime policy for the vfmt formatting engine.
//!
//! This crate holds the process-wide state that sits around the engine
//! rather than inside it:
//! - **Configuration** (`config`): directive policy and buffer sizing, read
//!   once from the environment
//! - **Metrics** (`metrics`): atomic counters for observability
//! - **Structured logging** (`log`): canonical JSONL records

#![deny(unsafe_code)]

pub mod config;
pub mod log;
pub mod metrics;

pub use config::{DirectivePolicy, FormatConfig, format_config};
pub use log::{LogEmitter, LogEntry, LogLevel, Outcome, now_utc, validate_log_line};
pub use metrics::{FormatMetrics, MetricsSnapshot, global_metrics};
