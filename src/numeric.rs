//! Big-integer helpers
//!
//! On-chain amounts stay `U256` end to end. Decimal strings only appear where
//! values cross a boundary: indexer responses, config files, reports.

use alloy::primitives::U256;

/// Sentinel written by upstream fetchers when a balance could not be read
pub const ERROR_SENTINEL: &str = "Error";

/// Convert a decimal string to `U256`, falling back to `default`.
///
/// Missing, empty and `"Error"` inputs return `default` silently. Anything else
/// that does not parse as a non-negative integer is logged and also returns
/// `default`; this function never fails.
pub fn safe_u256(value: Option<&str>, default: U256) -> U256 {
    let Some(raw) = value.map(str::trim) else {
        return default;
    };
    if raw.is_empty() || raw == ERROR_SENTINEL {
        return default;
    }

    match U256::from_str_radix(raw, 10) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(value = raw, error = %e, "Failed to parse integer, using default");
            default
        }
    }
}

/// Format a raw amount with `decimals` fractional digits
pub fn format_units(value: U256, decimals: u32) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let remainder_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = remainder_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

/// Serde adapter that writes `U256` as a decimal string.
///
/// alloy's default representation is hex, which is unreadable in config files
/// and reports.
pub mod decimal {
    use alloy::primitives::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_str_radix(raw.trim(), 10).map_err(de::Error::custom)
    }
}

/// Serde adapter for amounts coming from external services.
///
/// Accepts decimal strings, JSON integers or `null`; anything unparseable goes
/// through [`safe_u256`] and becomes zero. Writes decimal strings.
pub mod lenient {
    use super::safe_u256;
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(text)) => safe_u256(Some(&text), U256::ZERO),
            Some(Raw::Number(n)) => U256::from(n),
            None => U256::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_well_formed_integers() {
        let default = U256::from(7u64);
        assert_eq!(safe_u256(Some("0"), default), U256::ZERO);
        assert_eq!(safe_u256(Some("42"), default), U256::from(42u64));
        assert_eq!(safe_u256(Some(" 42 "), default), U256::from(42u64));

        // Far beyond f64's exact integer range
        let big = "123456789012345678901234567890123456789";
        assert_eq!(
            safe_u256(Some(big), default).to_string(),
            big.to_string()
        );
        assert_eq!(
            safe_u256(Some("9007199254740993"), default),
            U256::from(9_007_199_254_740_993u64)
        );
    }

    #[test]
    fn test_falls_back_to_default() {
        let default = U256::from(7u64);
        for input in [None, Some(""), Some("   "), Some("Error"), Some("not-a-number")] {
            assert_eq!(safe_u256(input, default), default, "input {:?}", input);
        }
        assert_eq!(safe_u256(Some("-5"), U256::ZERO), U256::ZERO);
        assert_eq!(safe_u256(Some("1.5"), U256::ZERO), U256::ZERO);
    }

    #[test]
    fn test_overflow_falls_back_to_default() {
        // 2^256
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert_eq!(safe_u256(Some(too_big), U256::ZERO), U256::ZERO);
    }

    #[test]
    fn test_format_units() {
        let one = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_units(one, 18), "1");

        let one_point_five = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(format_units(one_point_five, 18), "1.5");

        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            value: U256,
        }

        let json = serde_json::to_string(&Wrapper {
            value: U256::from(12345u64),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":"12345"}"#);

        let parsed: Wrapper = serde_json::from_str(r#"{"value":"99"}"#).unwrap();
        assert_eq!(parsed.value, U256::from(99u64));

        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"abc"}"#).is_err());
    }

    #[test]
    fn test_lenient_serde() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "lenient")]
            value: U256,
        }

        let parse = |json: &str| serde_json::from_str::<Wrapper>(json).unwrap().value;
        assert_eq!(parse(r#"{"value":"12345"}"#), U256::from(12345u64));
        assert_eq!(parse(r#"{"value":42}"#), U256::from(42u64));
        assert_eq!(parse(r#"{"value":null}"#), U256::ZERO);
        assert_eq!(parse(r#"{"value":"Error"}"#), U256::ZERO);
        assert_eq!(parse(r#"{"value":"garbage"}"#), U256::ZERO);
    }
}
