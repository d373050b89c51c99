use thiserror::Error;

/// Failures while turning textual input into model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hex string: {0}")]
    Hex(String),
    #[error("invalid vendor id: {0} (expected 4 hex digits)")]
    VendorId(String),
    #[error("invalid hardware address: {0}")]
    Address(String),
}

/// Decodes a hex string such as `4c0010` or `4c:00:10` into raw bytes.
///
/// Separators (`:`, `-`, spaces) are ignored.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, ParseError> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(|b| !matches!(b, b':' | b'-' | b' '))
        .collect();

    if digits.len() % 2 != 0 {
        return Err(ParseError::Hex(input.to_string()));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).map_err(|_| ParseError::Hex(input.to_string()))?;
            u8::from_str_radix(pair, 16).map_err(|_| ParseError::Hex(input.to_string()))
        })
        .collect()
}
