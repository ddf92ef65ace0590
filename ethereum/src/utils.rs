use anyhow::{anyhow, Error};

/// Parses a JSON-RPC quantity (`0x`-prefixed, minimal-length hex) into a u64.
pub fn hex_quantity_to_u64(hex_string: &str) -> Result<u64, Error> {
    let digits = hex_string
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("Quantity {} is missing the 0x prefix.", hex_string))?;

    match u64::from_str_radix(digits, 16) {
        Ok(i) => Ok(i),
        Err(e) => Err(anyhow!("{:?}", e)),
    }
}

pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_length_quantities() {
        assert_eq!(hex_quantity_to_u64("0x0").unwrap(), 0);
        assert_eq!(hex_quantity_to_u64("0x1").unwrap(), 1);
        assert_eq!(hex_quantity_to_u64("0xaa36a7").unwrap(), 11155111);
    }

    #[test]
    fn rejects_unprefixed_or_garbage_quantities() {
        assert!(hex_quantity_to_u64("1a").is_err());
        assert!(hex_quantity_to_u64("0xzz").is_err());
        assert!(hex_quantity_to_u64("").is_err());
    }

    #[test]
    fn encodes_bytes_with_prefix() {
        assert_eq!(bytes_to_hex_string(&[0x02, 0xf8, 0x6f]), "0x02f86f");
        assert_eq!(bytes_to_hex_string(&[]), "0x");
    }
}
