use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_money_creation() {
    let money = Money::new(dec!(100000.00), Currency::Usd);
    assert_eq!(money.amount, dec!(100000.00));
    assert_eq!(money.currency, Currency::Usd);
}

#[test]
fn test_money_zero_is_not_positive() {
    let money = Money::zero(Currency::Brl);
    assert!(money.is_zero());
    assert!(!money.is_positive());
    assert_eq!(money.amount, Decimal::ZERO);
}

#[test]
fn test_money_negative_is_not_positive() {
    assert!(!Money::new(dec!(-0.01), Currency::Usd).is_positive());
}

#[test]
fn test_round_dp_uses_bankers_rounding() {
    let up = Money::new(dec!(10.125), Currency::Usd).round_dp(2);
    let even = Money::new(dec!(10.135), Currency::Usd).round_dp(2);
    assert_eq!(up.amount, dec!(10.12));
    assert_eq!(even.amount, dec!(10.14));
}

#[test]
fn test_display_includes_currency() {
    let money = Money::new(dec!(250.50), Currency::Eur);
    assert_eq!(money.to_string(), "250.50 EUR");
}
