#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/levante/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Levante backtest engine.
//!
//! This crate provides the foundational pieces the rest of the workspace
//! builds on: the position-aligned price panel, the strategy enumeration,
//! the return-model seam, and the error taxonomy.

/// The version of the levante-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod model;
pub mod stats;
pub mod strategy;
pub mod types;

// Re-exports
pub use error::{LevanteError, Result};
pub use model::{ModelFit, ReturnModel};
pub use strategy::{MOMENTUM_GAP, RankDirection, StrategyKind, StrategySpec};
pub use types::{Date, PricePanel, Ticker};
