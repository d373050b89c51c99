//! # Device Tracking Store
//!
//! Folds advertisement events into one [`DeviceRecord`] per identifier.
//!
//! Each identifier moves `Unseen -> New -> Tracked` and may be upgraded once
//! from unnamed to named. The store returns edge-triggered
//! [`Notification`]s instead of printing, so callers decide where they go.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Local};
use sniffr_common::device::band::ProximityBand;
use sniffr_common::device::event::AdvertisementEvent;
use sniffr_common::device::record::{DeviceRecord, ManufacturerInfo};
use sniffr_common::device::DeviceId;
use sniffr_common::vendors::{VendorId, VendorRepository};
use tracing::{debug, trace};

use crate::decoder::decode_manufacturer;
use crate::distance::distance_band;
use crate::services::{infer_service_tag, resolve_service_names};

#[derive(Debug, Clone)]
pub enum Notification {
    /// First sighting, or the unnamed -> named upgrade of a known identifier.
    NewDevice(Box<DeviceRecord>),
    BandChange {
        identity: String,
        name: Option<String>,
        previous: ProximityBand,
        current: ProximityBand,
    },
}

/// Per-event decoding result, computed before the record is touched.
struct Decoded {
    manufacturer: Option<ManufacturerInfo>,
    tag: Option<String>,
    services: Vec<String>,
}

pub struct DeviceTracker {
    vendors: Arc<dyn VendorRepository>,
    index: HashMap<DeviceId, usize>,
    records: Vec<DeviceRecord>,
    unknown_vendors: BTreeSet<VendorId>,
}

impl DeviceTracker {
    pub fn new(vendors: Arc<dyn VendorRepository>) -> Self {
        Self {
            vendors,
            index: HashMap::new(),
            records: Vec::new(),
            unknown_vendors: BTreeSet::new(),
        }
    }

    /// Applies one event and returns the notifications it triggered, in order.
    pub fn observe(&mut self, event: &AdvertisementEvent, at: DateTime<Local>) -> Vec<Notification> {
        let decoded = self.decode(event);

        match self.index.get(&event.id) {
            Some(&idx) => update_record(&mut self.records[idx], event, decoded, at),
            None => {
                let record = create_record(event, decoded, at);
                debug!(id = %record.id, rssi = record.rssi, "new device");
                let notification = Notification::NewDevice(Box::new(record.clone()));
                self.index.insert(event.id.clone(), self.records.len());
                self.records.push(record);
                vec![notification]
            }
        }
    }

    fn decode(&mut self, event: &AdvertisementEvent) -> Decoded {
        let manufacturer =
            decode_manufacturer(event.manufacturer_data.as_deref(), self.vendors.as_ref());

        if let Some(info) = &manufacturer
            && !info.resolved
            && self.unknown_vendors.insert(info.vendor_id)
        {
            debug!(vendor_id = %info.vendor_id, "unresolved vendor id");
        }

        let tag = manufacturer
            .as_ref()
            .and_then(|info| info.device_type.clone())
            .or_else(|| infer_service_tag(&event.services));

        Decoded {
            manufacturer,
            tag,
            services: resolve_service_names(&event.services),
        }
    }

    /// Records in first-sighting order.
    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn get(&self, id: &DeviceId) -> Option<&DeviceRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    /// Frozen copy of every record, for the end-of-session report.
    pub fn snapshot(&self) -> Vec<DeviceRecord> {
        self.records.clone()
    }

    pub fn unknown_vendors(&self) -> &BTreeSet<VendorId> {
        &self.unknown_vendors
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn create_record(event: &AdvertisementEvent, decoded: Decoded, at: DateTime<Local>) -> DeviceRecord {
    let mut record = DeviceRecord::new(event.id.clone(), event.rssi, distance_band(event.rssi), at);
    record.address = event.address;
    record.name = event.known_name().map(str::to_string);
    record.manufacturer = decoded.manufacturer;
    record.tags.extend(decoded.tag);
    record.services = decoded.services;
    record
}

fn update_record(
    record: &mut DeviceRecord,
    event: &AdvertisementEvent,
    decoded: Decoded,
    at: DateTime<Local>,
) -> Vec<Notification> {
    record.rssi = event.rssi;
    record.min_rssi = record.min_rssi.min(event.rssi);
    record.max_rssi = record.max_rssi.max(event.rssi);
    record.detections += 1;
    record.last_seen = at;

    if record.address.is_none() {
        record.address = event.address;
    }

    let mut became_named = false;
    if let Some(name) = event.known_name()
        && record.name.is_none()
    {
        record.name = Some(name.to_string());
        became_named = true;
    }

    let previous_band = record.band;
    let band = distance_band(event.rssi);
    record.band = band;

    record.tags.extend(decoded.tag);

    if let Some(info) = decoded.manufacturer {
        let upgrade = match &record.manufacturer {
            None => true,
            Some(current) => current.device_type.is_none() && info.device_type.is_some(),
        };
        if upgrade {
            record.manufacturer = Some(info);
        }
    }

    if record.services.is_empty() && !decoded.services.is_empty() {
        record.services = decoded.services;
    }

    trace!(id = %record.id, detections = record.detections, "device updated");

    let mut notifications = Vec::new();
    if became_named {
        debug!(id = %record.id, name = record.display_name(), "device named");
        notifications.push(Notification::NewDevice(Box::new(record.clone())));
    }
    if band != previous_band {
        notifications.push(Notification::BandChange {
            identity: record.display_identity(),
            name: record.name.clone(),
            previous: previous_band,
            current: band,
        });
    }
    notifications
}
