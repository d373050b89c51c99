#![cfg(test)]
use std::sync::Arc;

use sniffr_common::device::band::ProximityBand;
use sniffr_common::vendors::VendorId;
use sniffr_core::distance::distance_band;
use sniffr_core::session::ScanSession;
use sniffr_core::tags::apple;
use sniffr_core::vendors::VendorTable;

use super::util::{apple, repeat, session, AIRPLAY_SOURCE, AIRPODS, FIND_MY, HANDOFF};

/*************************************************************
                    Vendor identification
**************************************************************/

#[test]
fn apple_payload_resolves_against_a_minimal_table() {
    let table: VendorTable = [(VendorId::APPLE, "Apple".to_string())].into_iter().collect();
    let mut session = ScanSession::new(Arc::new(table));
    session.handle_event(&apple("a", -60, 0x10));

    let record = &session.tracker().records()[0];
    let info = record.manufacturer.as_ref().expect("manufacturer decoded");
    assert_eq!(info.vendor_id.to_string(), "004c");
    assert_eq!(info.vendor_name, "Apple");
}

#[test]
fn unknown_vendor_is_reported_once() {
    let mut session = session();
    let odd = sniffr_common::device::event::AdvertisementEvent::new("x", -70)
        .with_manufacturer_data(vec![0xff, 0xee, 0x01]);
    repeat(&mut session, &odd, 3);

    let report = session.finalize().unwrap().unwrap();
    let unknown: Vec<String> = report.unknown_vendors.iter().map(ToString::to_string).collect();
    assert_eq!(unknown, vec!["eeff"]);
}

/*************************************************************
                       Distance bands
**************************************************************/

#[test]
fn rssi_samples_land_in_expected_bands() {
    assert_eq!(distance_band(-55), ProximityBand::Near);
    assert_eq!(distance_band(-45), ProximityBand::Immediate);
    assert_eq!(distance_band(-95), ProximityBand::Far);
    assert_eq!(distance_band(-55).label(), "2-10m");
}

/*************************************************************
                    Identity correlation
**************************************************************/

#[test]
fn phone_absorbs_its_find_my_beacon() {
    let mut session = session();
    repeat(&mut session, &apple("phone", -60, HANDOFF).with_name("Kim's Phone"), 10);
    repeat(&mut session, &apple("beacon", -65, FIND_MY), 3);

    let report = session.finalize().unwrap().unwrap();
    let groups = &report.families[0].groups;

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name.as_deref(), Some("Kim's Phone"));
    assert_eq!(groups[0].detections, 13);
    assert!(groups[0].tags.contains(apple::HANDOFF));
    assert!(groups[0].tags.contains(apple::FIND_MY));
    assert_eq!(report.estimated_devices(), 1);
}

#[test]
fn mac_does_not_absorb_nearby_earbuds() {
    let mut session = session();
    repeat(&mut session, &apple("mac", -60, AIRPLAY_SOURCE).with_name("Kim's Mac"), 4);
    repeat(&mut session, &apple("buds", -62, AIRPODS), 4);

    let report = session.finalize().unwrap().unwrap();
    let groups = &report.families[0].groups;

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name.as_deref(), Some("Kim's Mac"));
    assert_eq!(groups[0].members.len(), 1);
    assert!(groups[1].tags.contains(apple::AIRPODS));
}

#[test]
fn far_beacon_stays_separate() {
    let mut session = session();
    repeat(&mut session, &apple("phone", -50, HANDOFF).with_name("Kim's Phone"), 2);
    repeat(&mut session, &apple("beacon", -85, FIND_MY), 2);

    let report = session.finalize().unwrap().unwrap();
    assert_eq!(report.families[0].groups.len(), 2);
}

#[test]
fn unnamed_earbuds_pick_up_a_find_my_record() {
    let mut session = session();
    repeat(&mut session, &apple("buds", -58, AIRPODS), 5);
    repeat(&mut session, &apple("case", -61, FIND_MY), 2);

    let report = session.finalize().unwrap().unwrap();
    let groups = &report.families[0].groups;

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.len(), 2);
    assert_eq!(groups[0].label, "AirPods / Beats");
}

#[test]
fn finalize_is_idempotent() {
    let mut session = session();
    session.handle_event(&apple("a", -60, HANDOFF));

    assert!(session.finalize().unwrap().is_some());
    assert!(session.finalize().unwrap().is_none());
}
