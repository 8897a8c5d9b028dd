//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: &Money<'static, Currency>, quantity: u32) -> Money<'static, Currency> {
    Money::from_minor(
        unit_price.to_minor_units() * i64::from(quantity),
        unit_price.currency(),
    )
}

/// Converts a money value to a decimal carrying the currency's minor-unit scale,
/// so BRL 250 renders as `250.00`.
pub fn to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Renders an amount the way the storefront shows it, e.g. `R$ 250.00`.
pub fn display_amount(money: &Money<'_, Currency>) -> String {
    format!("{} {}", money.currency().symbol, to_decimal(money))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    #[test]
    fn line_total_multiplies_unit_price() {
        let price = Money::from_minor(100_00, iso::BRL);

        assert_eq!(line_total(&price, 3), Money::from_minor(300_00, iso::BRL));
    }

    #[test]
    fn to_decimal_keeps_two_fraction_digits() {
        let money = Money::from_minor(250_00, iso::BRL);

        assert_eq!(to_decimal(&money).to_string(), "250.00");
    }

    #[test]
    fn to_decimal_of_zero() {
        let money = Money::from_minor(0, iso::BRL);

        assert_eq!(to_decimal(&money).to_string(), "0.00");
    }

    #[test]
    fn display_amount_uses_currency_symbol() {
        let money = Money::from_minor(899_99, iso::BRL);

        assert_eq!(display_amount(&money), "R$ 899.99");
    }
}
