//! CLI subcommand modules.
//!
//! This module contains the implementations for all levante CLI subcommands.

pub(crate) mod backtest;
pub(crate) mod rank;
