//! # symptrack-core
//!
//! Core library for symptrack - pattern analytics over a personal log of
//! physical symptom episodes.
//!
//! This library provides:
//! - Domain types for logged episodes
//! - Window filtering (last N days, or all time)
//! - The analytics passes and the engine that runs them
//! - Journal export reading
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Raw:** The exported journal on disk (JSON array or JSON lines)
//! - **Entries:** [`SymptomEntry`] records, tolerated even when partially malformed
//! - **Derived:** An [`AnalyticsResult`] recomputed from scratch on every call
//!
//! ## Example
//!
//! ```rust,no_run
//! use symptrack_core::{journal, AnalyticsEngine, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let read = journal::read_entries(&Config::journal_path()).expect("failed to read journal");
//!
//! let result = AnalyticsEngine::new().compute_window(&read.entries, config.analytics.default_window);
//! for insight in &result.insights {
//!     println!("{}", insight);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_analytics, AnalyticsEngine, AnalyticsResult, Clock};
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
pub use window::{filter_window, AnalyticsWindow, ALL_TIME_SENTINEL};

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod journal;
pub mod logging;
pub mod types;
pub mod window;
