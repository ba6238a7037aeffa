use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 20-byte account or contract address
///
/// Displayed and serialized as lower-case `0x`-prefixed hex, which is also
/// the form used in entity ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(alloy::primitives::Address);

/// Error returned when a string is not a 20-byte hex address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAddress(pub String);

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid address: {}", self.0)
    }
}

impl std::error::Error for InvalidAddress {}

impl Address {
    pub fn zero() -> Self {
        Address(alloy::primitives::Address::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_slice()))
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    // Mixed-case input is accepted without checksum validation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !(s.starts_with("0x") || s.starts_with("0X")) {
            return Err(InvalidAddress(s.to_string()));
        }
        alloy::primitives::Address::from_str(s)
            .map(Address)
            .map_err(|_| InvalidAddress(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = InvalidAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::from_str(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl From<alloy::primitives::Address> for Address {
    fn from(value: alloy::primitives::Address) -> Self {
        Address(value)
    }
}

impl From<Address> for alloy::primitives::Address {
    fn from(value: Address) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let address = Address::from_str("0xABCDEFabcdef0123456789ABCDEF012345678901").unwrap();
        assert_eq!(address.to_string(), "0xabcdefabcdef0123456789abcdef012345678901");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Address::from_str("abcdefabcdef0123456789abcdef012345678901").is_err());
        assert!(Address::from_str("0x1234").is_err());
        assert!(Address::from_str("0xzzcdefabcdef0123456789abcdef012345678901").is_err());
    }

    #[test]
    fn test_converts_to_and_from_alloy() {
        let address = Address::from_str("0x00000000000000000000000000000000000000ff").unwrap();
        let raw: alloy::primitives::Address = address.into();
        assert_eq!(raw.as_slice()[19], 0xff);
        assert_eq!(Address::from(raw), address);
        assert!(Address::zero().is_zero());
        assert_eq!(Address::zero().to_string(), format!("0x{}", "0".repeat(40)));
    }
}
