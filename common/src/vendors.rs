//! # Vendor Identifiers
//!
//! Bluetooth SIG company identifiers travel little-endian inside the
//! manufacturer-specific data of an advertisement. [`VendorId`] always holds
//! the canonical value, so `4c 00` on the wire becomes `004c`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VendorId(u16);

impl VendorId {
    pub const APPLE: VendorId = VendorId(0x004c);
    pub const MICROSOFT: VendorId = VendorId(0x0006);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Reads the id from the first two payload bytes (wire order).
    pub fn from_wire(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

impl FromStr for VendorId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches("0x");
        if trimmed.len() != 4 {
            return Err(ParseError::VendorId(s.to_string()));
        }
        u16::from_str_radix(trimmed, 16)
            .map(VendorId)
            .map_err(|_| ParseError::VendorId(s.to_string()))
    }
}

impl TryFrom<String> for VendorId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VendorId> for String {
    fn from(id: VendorId) -> Self {
        id.to_string()
    }
}

/// Swaps the two bytes of a 4-digit hex pair: `4c00` <-> `004c`.
///
/// Returns `None` when the input is not exactly four hex digits.
pub fn swap_byte_order(pair: &str) -> Option<String> {
    if pair.len() != 4 || !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("{}{}", &pair[2..4], &pair[0..2]))
}

/// Source of vendor names and per-vendor sub-type tables.
///
/// Lookups never fail hard: a missing entry is simply `None`.
pub trait VendorRepository: Send + Sync {
    fn vendor_name(&self, id: VendorId) -> Option<String>;

    /// Whether `id` is on the allow-list of vendors with a sub-type table.
    fn has_sub_types(&self, _id: VendorId) -> bool {
        false
    }

    fn sub_type(&self, _id: VendorId, _code: u8) -> Option<String> {
        None
    }
}
