//! Shared types, error model, and configuration for DividendLens.
//!
//! This crate is the foundation depended on by all other DividendLens crates.
//! It provides:
//! - [`DividendLensError`], the unified error type
//! - Domain types ([`Section`], [`SectionMap`], [`DuplicatePolicy`])
//! - Configuration ([`AppConfig`], [`AnalysisConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AnalysisConfig, AppConfig, DashboardConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{DividendLensError, Result};
pub use types::{DEFAULT_INTRO_LABEL, DuplicatePolicy, Section, SectionMap};
