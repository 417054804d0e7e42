//! Display formatting. All values render with two decimal places, rounding
//! half away from zero; net units and ROI always carry a sign.

use crate::report::StatsBundle;
use rust_decimal::{Decimal, RoundingStrategy};

fn round2(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Avoid rendering "-0.00".
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// `3.456` -> `"3.46"`.
pub fn format_units(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// `1.5` -> `"+1.50"`, `-2` -> `"-2.00"`, `0` -> `"+0.00"`.
pub fn format_signed(value: Decimal) -> String {
    let rounded = round2(value);
    if rounded.is_sign_negative() {
        format!("{:.2}", rounded)
    } else {
        format!("+{:.2}", rounded)
    }
}

/// `50` -> `"50.00%"`.
pub fn format_pct(value: Decimal) -> String {
    format!("{}%", format_units(value))
}

/// `-12.345` -> `"-12.35%"`.
pub fn format_signed_pct(value: Decimal) -> String {
    format!("{}%", format_signed(value))
}

/// A bundle rendered for tables and metric widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDisplay {
    pub total: String,
    pub wins: String,
    pub losses: String,
    pub pushes: String,
    pub win_rate: String,
    pub units_risked: String,
    pub units_won: String,
    pub net_units: String,
    pub roi: String,
}

impl From<&StatsBundle> for StatsDisplay {
    fn from(stats: &StatsBundle) -> Self {
        Self {
            total: stats.total.to_string(),
            wins: stats.wins.to_string(),
            losses: stats.losses.to_string(),
            pushes: stats.pushes.to_string(),
            win_rate: format_pct(stats.win_rate),
            units_risked: format_units(stats.units_risked),
            units_won: format_units(stats.units_won),
            net_units: format_signed(stats.net_units),
            roi: format_signed_pct(stats.roi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_units_to_two_places() {
        assert_eq!(format_units(dec!(3)), "3.00");
        assert_eq!(format_units(dec!(3.456)), "3.46");
        assert_eq!(format_units(dec!(0.125)), "0.13");
    }

    #[test]
    fn signed_values_carry_explicit_sign() {
        assert_eq!(format_signed(dec!(1.5)), "+1.50");
        assert_eq!(format_signed(dec!(-2)), "-2.00");
        assert_eq!(format_signed(dec!(0)), "+0.00");
        assert_eq!(format_signed(dec!(-0.001)), "+0.00");
        assert_eq!(format_signed_pct(dec!(-12.345)), "-12.35%");
    }

    #[test]
    fn renders_a_bundle() {
        let stats = StatsBundle {
            total: 3,
            wins: 1,
            losses: 1,
            pushes: 1,
            units_risked: dec!(3),
            units_won: dec!(3.5),
            net_units: dec!(0.5),
            win_rate: dec!(50),
            roi: dec!(16.666666),
        };
        let shown = StatsDisplay::from(&stats);
        assert_eq!(shown.win_rate, "50.00%");
        assert_eq!(shown.net_units, "+0.50");
        assert_eq!(shown.roi, "+16.67%");
        assert_eq!(shown.units_won, "3.50");
    }
}
