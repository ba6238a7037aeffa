//! Exact integer and decimal arithmetic for on-chain amounts
//!
//! Two kinds of numbers flow through the reducers:
//! - [`BigInt`] for counts and raw on-chain integer amounts
//! - [`BigDecimal`] for scaled, human-facing amounts
//!
//! Both are arbitrary precision (`num-bigint` and `bigdecimal`), so sums of
//! uint256 amounts never overflow and nothing is rounded implicitly.
//!
//! Dividing a `BigInt` by the protocol divisor drops the remainder, while
//! dividing a `BigDecimal` keeps every fractional digit. A decimal division
//! whose result has no finite base-10 expansion is an error, not a rounding.
//! Callers pick one explicitly.

use alloy::primitives::U256;
use num_bigint::{BigUint, Sign};
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Upper bound on the power of ten tried when dividing exactly
const MAX_DIVISION_SCALE: i64 = 64;

/// Error type for numeric conversions and arithmetic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    /// Input is not a base-10 number
    Parse(String),
    /// Input has a fractional part where an integer is required
    NotAnInteger(String),
    /// Value does not fit the unsigned 256-bit range of a contract field
    OutOfRange(String),
    /// Quotient has no finite decimal expansion
    Inexact(String),
    /// Division by zero
    DivisionByZero,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Parse(input) => write!(f, "Invalid number: {}", input),
            NumericError::NotAnInteger(input) => write!(f, "Expected an integer, got {}", input),
            NumericError::OutOfRange(input) => write!(f, "Not a uint256 value: {}", input),
            NumericError::Inexact(op) => write!(f, "Division {} is not exact in base 10", op),
            NumericError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl Error for NumericError {}

/// Exact signed integer of unbounded size
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    pub const ZERO: BigInt = BigInt(num_bigint::BigInt::ZERO);

    pub fn one() -> Self {
        BigInt(num_bigint::BigInt::one())
    }

    pub fn from_u64(value: u64) -> Self {
        BigInt(num_bigint::BigInt::from(value))
    }

    /// Builds `mantissa * 10^exponent`
    pub fn pow10(mantissa: u64, exponent: u32) -> Self {
        BigInt(num_bigint::BigInt::from(mantissa) * num_bigint::BigInt::from(10u8).pow(exponent))
    }

    /// Parses a base-10 uint256 contract value
    ///
    /// Negative numbers and values above `2^256 - 1` are rejected.
    pub fn parse_uint256(s: &str) -> Result<Self, NumericError> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(NumericError::OutOfRange(s.to_string()));
        }
        let value = BigInt::from_str(trimmed)?;
        if value.0.bits() > 256 {
            return Err(NumericError::OutOfRange(s.to_string()));
        }
        Ok(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn checked_add(&self, other: &BigInt) -> Result<BigInt, NumericError> {
        Ok(BigInt(&self.0 + &other.0))
    }

    pub fn checked_sub(&self, other: &BigInt) -> Result<BigInt, NumericError> {
        Ok(BigInt(&self.0 - &other.0))
    }

    pub fn checked_mul(&self, other: &BigInt) -> Result<BigInt, NumericError> {
        Ok(BigInt(&self.0 * &other.0))
    }

    pub fn increment(&self) -> Result<BigInt, NumericError> {
        self.checked_add(&BigInt::one())
    }

    pub fn decrement(&self) -> Result<BigInt, NumericError> {
        self.checked_sub(&BigInt::one())
    }

    /// Integer division; the remainder is discarded
    pub fn floor_div(&self, divisor: u64) -> Result<BigInt, NumericError> {
        if divisor == 0 {
            return Err(NumericError::DivisionByZero);
        }
        Ok(BigInt(&self.0 / divisor))
    }

    pub fn to_decimal(&self) -> BigDecimal {
        BigDecimal(bigdecimal::BigDecimal::new(self.0.clone(), 0))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BigInt {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = num_bigint::BigInt::from_str(trimmed) {
            return Ok(BigInt(value));
        }

        // "7.000" is still an integer
        let decimal = bigdecimal::BigDecimal::from_str(trimmed)
            .map_err(|_| NumericError::Parse(s.to_string()))?;
        if !decimal.is_integer() {
            return Err(NumericError::NotAnInteger(s.to_string()));
        }
        let (digits, _) = decimal.with_scale(0).into_bigint_and_exponent();
        Ok(BigInt(digits))
    }
}

impl TryFrom<String> for BigInt {
    type Error = NumericError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BigInt::from_str(&value)
    }
}

impl From<BigInt> for String {
    fn from(value: BigInt) -> Self {
        value.to_string()
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        BigInt::from_u64(value)
    }
}

impl From<U256> for BigInt {
    fn from(value: U256) -> Self {
        let magnitude = BigUint::from_bytes_be(&value.to_be_bytes::<32>());
        BigInt(num_bigint::BigInt::from_biguint(Sign::Plus, magnitude))
    }
}

/// Deserializes a uint256 event field given as a base-10 string
pub fn deserialize_uint256<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    BigInt::parse_uint256(&raw).map_err(serde::de::Error::custom)
}

/// Exact base-10 decimal of unbounded size
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigDecimal(bigdecimal::BigDecimal);

impl BigDecimal {
    pub fn zero() -> Self {
        BigDecimal(bigdecimal::BigDecimal::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn checked_add(&self, other: &BigDecimal) -> Result<BigDecimal, NumericError> {
        Ok(BigDecimal(&self.0 + &other.0))
    }

    pub fn checked_sub(&self, other: &BigDecimal) -> Result<BigDecimal, NumericError> {
        Ok(BigDecimal(&self.0 - &other.0))
    }

    /// Exact decimal division by an integer divisor
    ///
    /// The quotient is scaled by the smallest power of ten the divisor
    /// divides, so every digit is kept. Divisors with a prime factor other
    /// than 2 or 5 are rejected unless the division happens to be even.
    pub fn div_int(&self, divisor: u64) -> Result<BigDecimal, NumericError> {
        if divisor == 0 {
            return Err(NumericError::DivisionByZero);
        }

        let (digits, scale) = self.0.as_bigint_and_exponent();
        let divisor_int = num_bigint::BigInt::from(divisor);

        if (&digits % &divisor_int).is_zero() {
            return Ok(BigDecimal(
                bigdecimal::BigDecimal::new(digits / divisor_int, scale).normalized(),
            ));
        }

        let ten = num_bigint::BigInt::from(10u8);
        let mut power = num_bigint::BigInt::one();
        for extra in 1..=MAX_DIVISION_SCALE {
            power *= &ten;
            if (&power % &divisor_int).is_zero() {
                let quotient = digits * (power / divisor_int);
                return Ok(BigDecimal(
                    bigdecimal::BigDecimal::new(quotient, scale + extra).normalized(),
                ));
            }
        }

        Err(NumericError::Inexact(format!("{} / {}", self, divisor)))
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.normalized().to_plain_string())
    }
}

impl FromStr for BigDecimal {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        bigdecimal::BigDecimal::from_str(s.trim())
            .map(BigDecimal)
            .map_err(|_| NumericError::Parse(s.to_string()))
    }
}

impl TryFrom<String> for BigDecimal {
    type Error = NumericError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BigDecimal::from_str(&value)
    }
}

impl From<BigDecimal> for String {
    fn from(value: BigDecimal) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> BigInt {
        BigInt::from_str(s).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_floor_division_discards_remainder() {
        assert_eq!(int("12").floor_div(5).unwrap(), int("2"));
        assert_eq!(int("10").floor_div(5).unwrap(), int("2"));
        assert_eq!(int("4").floor_div(5).unwrap(), BigInt::ZERO);
    }

    #[test]
    fn test_floor_and_decimal_division_diverge_on_remainder() {
        let amount = int("12");
        let floored = amount.floor_div(5).unwrap().to_decimal();
        let exact = amount.to_decimal().div_int(5).unwrap();

        assert_eq!(floored.to_string(), "2");
        assert_eq!(exact.to_string(), "2.4");
        assert_ne!(floored, exact);

        let even = int("500000000000000000000");
        assert_eq!(
            even.floor_div(5).unwrap().to_decimal(),
            even.to_decimal().div_int(5).unwrap()
        );
    }

    #[test]
    fn test_pow10_builds_initial_supply() {
        let supply = BigInt::pow10(10_000, 18);
        assert_eq!(supply.to_string(), "10000000000000000000000");
        assert_eq!(supply.floor_div(5).unwrap().to_string(), "2000000000000000000000");
    }

    #[test]
    fn test_parse_rejects_fractions_and_garbage() {
        assert_eq!(
            BigInt::from_str("1.5"),
            Err(NumericError::NotAnInteger("1.5".to_string()))
        );
        assert!(matches!(BigInt::from_str("0xff"), Err(NumericError::Parse(_))));
        assert_eq!(int("7.000"), int("7"));
    }

    #[test]
    fn test_values_beyond_96_bits_stay_exact() {
        // 2^96 + 1
        let above = int("79228162514264337593543950337");
        let sum = above.checked_add(&above).unwrap();
        assert_eq!(sum.to_string(), "158456325028528675187087900674");

        let huge = BigInt::pow10(1, 40);
        assert_eq!(
            huge.checked_mul(&huge).unwrap().to_string(),
            format!("1{}", "0".repeat(80))
        );
    }

    #[test]
    fn test_decimal_division_keeps_every_digit() {
        let amount = int("79228162514264337593543950331").to_decimal();
        assert_eq!(
            amount.div_int(5).unwrap().to_string(),
            "15845632502852867518708790066.2"
        );
        assert_eq!(dec("1").div_int(8).unwrap().to_string(), "0.125");
        assert_eq!(dec("-3").div_int(5).unwrap().to_string(), "-0.6");
    }

    #[test]
    fn test_non_terminating_division_is_an_error() {
        assert!(matches!(dec("1").div_int(3), Err(NumericError::Inexact(_))));
        assert_eq!(dec("9").div_int(3).unwrap().to_string(), "3");
        assert_eq!(dec("1").div_int(0), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_uint256_bounds() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(BigInt::parse_uint256(max).unwrap().to_string(), max);
        assert_eq!(BigInt::from(U256::MAX).to_string(), max);

        let above = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(BigInt::parse_uint256(above), Err(NumericError::OutOfRange(_))));
        assert!(matches!(BigInt::parse_uint256("-5"), Err(NumericError::OutOfRange(_))));
        assert_eq!(BigInt::parse_uint256("0").unwrap(), BigInt::ZERO);
    }

    #[test]
    fn test_serde_uses_strings() {
        let value = int("500000000000000000000");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"500000000000000000000\"");

        let decimal: BigDecimal = serde_json::from_str("\"100.50\"").unwrap();
        assert_eq!(serde_json::to_string(&decimal).unwrap(), "\"100.5\"");

        let round: BigDecimal = serde_json::from_str("\"2000000000000000000000\"").unwrap();
        assert_eq!(round.to_string(), "2000000000000000000000");
    }

    #[test]
    fn test_negative_detection() {
        assert!(!BigInt::ZERO.is_negative());
        assert!(BigInt::ZERO.decrement().unwrap().is_negative());
        assert!(!BigDecimal::zero().is_positive());
        assert!(dec("0.1").is_positive());
    }
}
