//! Strategy vocabulary: momentum and reversal.
//!
//! The engine knows exactly two signal families. Each carries a fixed
//! reference-shift convention and a ranking direction, bound here once so
//! call sites never re-interpret strategy codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LevanteError;

/// Trading days a momentum signal skips before its lookback window.
///
/// Momentum excludes the most recent month of price action to keep
/// short-term reversal noise out of the signal; reversal reads the window
/// right up to the reference date.
pub const MOMENTUM_GAP: usize = 20;

/// The two supported strategy families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Bet that recent relative winners keep outperforming.
    Momentum,
    /// Bet that recent relative losers outperform going forward.
    Reversal,
}

/// Which end of a ranking wins selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDirection {
    /// Lowest score first.
    Ascending,
    /// Highest score first.
    Descending,
}

impl StrategyKind {
    /// Trading days the reference position shifts back before the lookback
    /// window is applied.
    #[must_use]
    pub const fn shift(self) -> usize {
        match self {
            Self::Momentum => MOMENTUM_GAP,
            Self::Reversal => 0,
        }
    }

    /// Ranking direction when this strategy's raw return drives selection.
    #[must_use]
    pub const fn direction(self) -> RankDirection {
        match self {
            Self::Momentum => RankDirection::Descending,
            Self::Reversal => RankDirection::Ascending,
        }
    }

    /// One-letter code used by the CLI surface.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Momentum => 'M',
            Self::Reversal => 'R',
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Momentum => write!(f, "momentum"),
            Self::Reversal => write!(f, "reversal"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = LevanteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "momentum" => Ok(Self::Momentum),
            "r" | "reversal" => Ok(Self::Reversal),
            other => Err(LevanteError::InvalidData(format!(
                "unknown strategy {other:?}, expected M or R"
            ))),
        }
    }
}

/// A strategy family bound to a lookback window length in trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySpec {
    /// Which family computes the signal.
    pub kind: StrategyKind,
    /// Lookback window length in trading days.
    pub window: usize,
}

impl StrategySpec {
    /// Creates a spec from a kind and window.
    #[must_use]
    pub const fn new(kind: StrategyKind, window: usize) -> Self {
        Self { kind, window }
    }

    /// Momentum spec over `window` trading days.
    #[must_use]
    pub const fn momentum(window: usize) -> Self {
        Self::new(StrategyKind::Momentum, window)
    }

    /// Reversal spec over `window` trading days.
    #[must_use]
    pub const fn reversal(window: usize) -> Self {
        Self::new(StrategyKind::Reversal, window)
    }

    /// Reference shift inherited from the strategy family.
    #[must_use]
    pub const fn shift(&self) -> usize {
        self.kind.shift()
    }

    /// Calendar positions that must exist before a reference position for
    /// the signal to be computable: the shift plus the window itself.
    #[must_use]
    pub const fn min_history(&self) -> usize {
        self.shift() + self.window
    }
}

impl fmt::Display for StrategySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.window)
    }
}
