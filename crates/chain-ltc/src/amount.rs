//! Whole-coin ↔ satoshi conversion.
//!
//! Amounts enter the crate as decimal LTC strings and are converted exactly
//! once, here. Everything downstream works in integer satoshis.

use bitcoin::{Amount, Denomination};

use crate::error::LtcError;

/// Satoshis per LTC.
pub const SATOSHIS_PER_LTC: u64 = 100_000_000;

/// Parse a positive decimal LTC amount (e.g. `"0.005"`) into satoshis.
pub fn parse_ltc(amount: &str) -> Result<Amount, LtcError> {
    let parsed = Amount::from_str_in(amount.trim(), Denomination::Bitcoin)
        .map_err(|e| LtcError::InvalidAmount(format!("{amount:?}: {e}")))?;
    if parsed == Amount::ZERO {
        return Err(LtcError::InvalidAmount("amount must be positive".into()));
    }
    Ok(parsed)
}

/// Render satoshis as a decimal LTC string without a unit suffix.
pub fn format_ltc(amount: Amount) -> String {
    amount.to_string_in(Denomination::Bitcoin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_amount_exactly() {
        assert_eq!(parse_ltc("0.005").unwrap().to_sat(), 500_000);
        assert_eq!(parse_ltc("0.00000001").unwrap().to_sat(), 1);
        assert_eq!(parse_ltc("1").unwrap().to_sat(), SATOSHIS_PER_LTC);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_ltc(" 0.1 ").unwrap().to_sat(), 10_000_000);
    }

    #[test]
    fn rejects_zero() {
        assert!(matches!(parse_ltc("0"), Err(LtcError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(parse_ltc("-1").is_err());
        assert!(parse_ltc("abc").is_err());
        assert!(parse_ltc("").is_err());
    }

    #[test]
    fn rejects_sub_satoshi_precision() {
        assert!(parse_ltc("0.000000001").is_err());
    }

    #[test]
    fn format_roundtrip() {
        let amount = Amount::from_sat(493_520);
        assert_eq!(parse_ltc(&format_ltc(amount)).unwrap(), amount);
    }
}
