//! Money formatting
//!
//! All amounts are `Decimal`; rendering always shows two decimal places,
//! rounded half away from zero.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Currency prefix used on every rendered amount
pub const CURRENCY_PREFIX: &str = "R$ ";

/// Round to 2 decimal places (half away from zero)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimals, e.g. `38.00`
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Render an amount with the currency prefix, e.g. `R$ 38.00`
pub fn format_brl(value: Decimal) -> String {
    format!("{}{}", CURRENCY_PREFIX, format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole() {
        assert_eq!(format_amount(Decimal::from(38)), "38.00");
        assert_eq!(format_brl(Decimal::from(11)), "R$ 11.00");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0.00");
    }

    #[test]
    fn test_format_pads_and_rounds() {
        assert_eq!(format_amount(Decimal::new(65, 1)), "6.50");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_amount(Decimal::new(12344, 3)), "12.34");
        assert_eq!(format_amount(Decimal::new(5, 3)), "0.01");
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_money(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
    }
}
