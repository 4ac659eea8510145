use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Parses a JSON price into a `Decimal` without passing through `f64` arithmetic.
///
/// Providers are inconsistent: CoinGecko sends numbers, Etherscan sends strings.
/// Numbers go through their shortest textual form, so `1500.12` stays `1500.12`.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_number_is_parsed_exactly() {
        assert_eq!(decimal_from_json(&json!(1500.12)), Some(dec!(1500.12)));
        assert_eq!(decimal_from_json(&json!(2400)), Some(dec!(2400)));
    }

    #[test]
    fn test_string_is_parsed() {
        assert_eq!(decimal_from_json(&json!("12")), Some(dec!(12)));
        assert_eq!(decimal_from_json(&json!(" 0.753 ")), Some(dec!(0.753)));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(decimal_from_json(&json!("1.5e3")), Some(dec!(1500)));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert_eq!(decimal_from_json(&json!("abc")), None);
        assert_eq!(decimal_from_json(&json!(null)), None);
        assert_eq!(decimal_from_json(&json!({"usd": 1})), None);
    }
}
