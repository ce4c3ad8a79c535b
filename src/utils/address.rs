use std::str::FromStr;

use alloy::primitives::Address;

use crate::error::ApiError;

/// Parse an EVM address, rejecting anything that is not 20 bytes of hex.
///
/// Input validation normally happens upstream in the HTTP layer, but every
/// service operation re-checks so that a direct caller gets a clear
/// [`ApiError::Validation`] instead of an opaque downstream failure.
pub fn parse_address(input: &str) -> Result<Address, ApiError> {
    Address::from_str(input)
        .map_err(|_| ApiError::Validation(format!("invalid Ethereum address: {input}")))
}

/// Addresses are lowercased before use as cache keys or subgraph parameters.
/// Responses echo the caller's original casing.
pub fn normalize_address(input: &str) -> String {
    input.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_checksummed_and_lowercase_addresses() {
        assert!(parse_address("0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640").is_ok());
        assert!(parse_address("0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640").is_ok());
    }

    #[test]
    fn rejects_non_address_input() {
        for bad in ["", "0xPOOL1", "88e6a0c2", "not-an-address"] {
            match parse_address(bad) {
                Err(ApiError::Validation(_)) => {},
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn normalization_lowercases_without_truncating() {
        assert_eq!(
            normalize_address("0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640"),
            "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640"
        );
    }
}
