use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use pnet::util::MacAddr;

use super::band::ProximityBand;
use super::event::Rssi;
use super::DeviceId;
use crate::vendors::VendorId;

/// Decoded manufacturer-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerInfo {
    pub vendor_id: VendorId,
    /// Resolved name, or `Unknown (<id>)` when the vendor table has no entry.
    pub vendor_name: String,
    pub device_type: Option<String>,
    /// `false` when `vendor_name` is a placeholder.
    pub resolved: bool,
}

impl ManufacturerInfo {
    pub fn unknown_name(id: VendorId) -> String {
        format!("Unknown ({id})")
    }
}

/// Everything accumulated about one identifier during a scan session.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub address: Option<MacAddr>,
    pub name: Option<String>,
    pub rssi: Rssi,
    pub min_rssi: Rssi,
    pub max_rssi: Rssi,
    pub manufacturer: Option<ManufacturerInfo>,
    pub tags: BTreeSet<String>,
    pub services: Vec<String>,
    pub band: ProximityBand,
    pub detections: u64,
    pub first_seen: DateTime<Local>,
    pub last_seen: DateTime<Local>,
}

impl DeviceRecord {
    pub fn new(id: DeviceId, rssi: Rssi, band: ProximityBand, seen_at: DateTime<Local>) -> Self {
        Self {
            id,
            address: None,
            name: None,
            rssi,
            min_rssi: rssi,
            max_rssi: rssi,
            manufacturer: None,
            tags: BTreeSet::new(),
            services: Vec::new(),
            band,
            detections: 1,
            first_seen: seen_at,
            last_seen: seen_at,
        }
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Hardware address when one was reported, the tracking id otherwise.
    pub fn display_identity(&self) -> String {
        match self.address {
            Some(address) => address.to_string(),
            None => self.id.to_string(),
        }
    }

    pub fn vendor_id(&self) -> Option<VendorId> {
        self.manufacturer.as_ref().map(|info| info.vendor_id)
    }
}
