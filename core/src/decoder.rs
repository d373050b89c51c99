//! Manufacturer-specific data decoding.
//!
//! Layout of the payload as seen by the core:
//!
//! ```text
//! [0..2]  company identifier, little-endian
//! [2]     vendor sub-type (only meaningful for allow-listed vendors)
//! [3..]   vendor specific
//! ```

use sniffr_common::device::record::ManufacturerInfo;
use sniffr_common::vendors::{VendorId, VendorRepository};

const SUB_TYPE_OFFSET: usize = 2;

/// Decodes a raw manufacturer payload.
///
/// Returns `None` for absent payloads and payloads shorter than the company
/// identifier. An unknown vendor is not an error: the name becomes
/// `Unknown (<id>)` and [`ManufacturerInfo::resolved`] is `false`.
pub fn decode_manufacturer(
    payload: Option<&[u8]>,
    vendors: &dyn VendorRepository,
) -> Option<ManufacturerInfo> {
    let payload = payload?;
    let id_bytes: [u8; 2] = payload.get(..2)?.try_into().ok()?;
    let vendor_id = VendorId::from_wire(id_bytes);

    let (vendor_name, resolved) = match vendors.vendor_name(vendor_id) {
        Some(name) => (name, true),
        None => (ManufacturerInfo::unknown_name(vendor_id), false),
    };

    let device_type = payload
        .get(SUB_TYPE_OFFSET)
        .filter(|_| vendors.has_sub_types(vendor_id))
        .and_then(|code| vendors.sub_type(vendor_id, *code));

    Some(ManufacturerInfo {
        vendor_id,
        vendor_name,
        device_type,
        resolved,
    })
}

#[cfg(test)]
mod tests {
    use sniffr_common::vendors::swap_byte_order;

    use super::*;
    use crate::tags;
    use crate::vendors::VendorTable;

    fn apple_only() -> VendorTable {
        [(VendorId::APPLE, "Apple".to_string())].into_iter().collect()
    }

    #[test]
    fn decodes_apple_nearby() {
        let payload = [0x4c, 0x00, 0x10, 0x05, 0x01];
        let info = decode_manufacturer(Some(&payload), &apple_only()).unwrap();

        assert_eq!(info.vendor_id.to_string(), "004c");
        assert_eq!(info.vendor_name, "Apple");
        assert_eq!(info.device_type.as_deref(), Some(tags::apple::NEARBY));
        assert!(info.resolved);
    }

    #[test]
    fn vendor_id_matches_swapped_wire_hex() {
        let payload = [0x75, 0x00, 0x01];
        let info = decode_manufacturer(Some(&payload), &apple_only()).unwrap();

        let wire_hex = format!("{:02x}{:02x}", payload[0], payload[1]);
        assert_eq!(wire_hex, "7500");
        assert_eq!(swap_byte_order(&wire_hex).as_deref(), Some(info.vendor_id.to_string().as_str()));
    }

    #[test]
    fn short_payloads_yield_nothing() {
        let vendors = apple_only();
        assert!(decode_manufacturer(None, &vendors).is_none());
        assert!(decode_manufacturer(Some(&[]), &vendors).is_none());
        assert!(decode_manufacturer(Some(&[0x4c]), &vendors).is_none());
    }

    #[test]
    fn two_bytes_give_vendor_without_type() {
        let info = decode_manufacturer(Some(&[0x4c, 0x00]), &apple_only()).unwrap();
        assert_eq!(info.vendor_name, "Apple");
        assert!(info.device_type.is_none());
    }

    #[test]
    fn unknown_vendor_gets_placeholder() {
        let info = decode_manufacturer(Some(&[0x34, 0x12, 0x10]), &apple_only()).unwrap();
        assert_eq!(info.vendor_id.to_string(), "1234");
        assert_eq!(info.vendor_name, "Unknown (1234)");
        assert!(!info.resolved);
        assert!(info.device_type.is_none());
    }

    #[test]
    fn sub_type_not_guessed_for_other_vendors() {
        let vendors: VendorTable = [(VendorId::new(0x0075), "Samsung".to_string())]
            .into_iter()
            .collect();
        let info = decode_manufacturer(Some(&[0x75, 0x00, 0x12]), &vendors).unwrap();
        assert_eq!(info.vendor_name, "Samsung");
        assert!(info.device_type.is_none());
    }

    #[test]
    fn unknown_sub_type_code_is_left_unresolved() {
        let info = decode_manufacturer(Some(&[0x4c, 0x00, 0xee]), &apple_only()).unwrap();
        assert!(info.device_type.is_none());
    }

    #[test]
    fn sub_types_resolve_even_without_vendor_name() {
        let info = decode_manufacturer(Some(&[0x4c, 0x00, 0x12]), &VendorTable::default()).unwrap();
        assert!(!info.resolved);
        assert_eq!(info.device_type.as_deref(), Some(tags::apple::FIND_MY));
    }

    #[test]
    fn decoding_is_deterministic() {
        let vendors = apple_only();
        let payload = [0x4c, 0x00, 0x0c, 0x0e];
        assert_eq!(
            decode_manufacturer(Some(&payload), &vendors),
            decode_manufacturer(Some(&payload), &vendors)
        );
    }
}
