#![cfg(test)]
use std::sync::Arc;

use chrono::Local;
use sniffr_common::device::band::ProximityBand;
use sniffr_common::device::event::{AdvertisementEvent, Rssi};
use sniffr_common::device::record::DeviceRecord;
use sniffr_common::device::DeviceId;
use sniffr_core::session::ScanSession;
use sniffr_core::vendors::VendorTable;

pub const HANDOFF: u8 = 0x0c;
pub const FIND_MY: u8 = 0x12;
pub const AIRPODS: u8 = 0x07;
pub const AIRPLAY_SOURCE: u8 = 0x0a;

pub fn session() -> ScanSession {
    ScanSession::new(Arc::new(VendorTable::builtin()))
}

pub fn apple(id: &str, rssi: Rssi, sub_type: u8) -> AdvertisementEvent {
    AdvertisementEvent::new(id, rssi).with_manufacturer_data(vec![0x4c, 0x00, sub_type, 0x01])
}

pub fn repeat(session: &mut ScanSession, event: &AdvertisementEvent, times: usize) {
    for _ in 0..times {
        session.handle_event(event);
    }
}

pub fn record(id: &str, name: Option<&str>, tags: &[&str], max_rssi: Rssi, detections: u64) -> DeviceRecord {
    let mut record = DeviceRecord::new(DeviceId::new(id), max_rssi, ProximityBand::Near, Local::now());
    record.name = name.map(str::to_string);
    record.tags = tags.iter().map(|t| t.to_string()).collect();
    record.detections = detections;
    record
}
