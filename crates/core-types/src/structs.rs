use crate::enums::PlayResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One settled play from the source table.
///
/// Only rows with a result and a parseable date ever become a `PlayRecord`;
/// the loader drops or rejects everything else before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub date: NaiveDate,
    pub play: String,
    /// Free-text odds notation, kept as given.
    pub odds: String,
    pub member: String,
    pub result: PlayResult,
    /// Units risked.
    pub units_out: Decimal,
    /// Units returned (stake plus profit on a win, stake on a push, 0 on a loss).
    pub units_in: Decimal,
}

impl PlayRecord {
    /// Profit or loss of this single play.
    pub fn net_units(&self) -> Decimal {
        self.units_in - self.units_out
    }
}
