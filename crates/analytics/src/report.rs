use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one subset of plays.
///
/// Values are exact; rounding is a display concern (see `crate::display`).
/// An empty subset yields the zeroed bundle from `StatsBundle::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    // I. Counts
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,

    // II. Units
    pub units_risked: Decimal,
    pub units_won: Decimal,
    pub net_units: Decimal,

    // III. Rates (percent)
    pub win_rate: Decimal,
    pub roi: Decimal,
}

impl StatsBundle {
    /// Creates a new, zeroed-out bundle.
    pub fn new() -> Self {
        Self {
            total: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            units_risked: Decimal::ZERO,
            units_won: Decimal::ZERO,
            net_units: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            roi: Decimal::ZERO,
        }
    }

    /// Wins plus losses; the plays that were decided.
    pub fn decisions(&self) -> usize {
        self.wins + self.losses
    }
}

impl Default for StatsBundle {
    fn default() -> Self {
        Self::new()
    }
}
