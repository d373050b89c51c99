#![cfg(test)]
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Local;
use proptest::prelude::*;
use sniffr_common::device::band::ProximityBand;
use sniffr_common::device::event::AdvertisementEvent;
use sniffr_common::device::record::DeviceRecord;
use sniffr_common::device::DeviceId;
use sniffr_core::correlation::{correlate, APPLE_RULES};
use sniffr_core::distance::distance_band;
use sniffr_core::tags::apple;
use sniffr_core::tracker::DeviceTracker;
use sniffr_core::vendors::VendorTable;

use super::util::record;

const TAGS: &[&str] = &[
    apple::AIRPLAY_SOURCE,
    apple::AIRPLAY_TARGET,
    apple::AIRPODS,
    apple::HANDOFF,
    apple::NEARBY,
    apple::HEY_SIRI,
    apple::FIND_MY,
    apple::TETHERING,
];

const NAMES: &[&str] = &["Kim's Phone", "Kim's Mac", "Lounge"];

/// One record's (name, tags, max rssi, detections). Names are drawn from a
/// small pool so same-name anchors show up; each record's own tags are kept
/// free of forbidden pairs.
fn arb_record() -> impl Strategy<Value = (Option<usize>, BTreeSet<&'static str>, i16, u64)> {
    (
        prop::option::of(0..NAMES.len()),
        prop::collection::btree_set(prop::sample::select(TAGS), 0..3),
        -100i16..-30,
        1u64..50,
    )
        .prop_filter("record tags must be compatible", |(_, tags, _, _)| {
            let owned: BTreeSet<String> = tags.iter().map(|t| t.to_string()).collect();
            APPLE_RULES.compatible(&owned, &BTreeSet::new())
        })
}

fn arb_records() -> impl Strategy<Value = Vec<DeviceRecord>> {
    prop::collection::vec(arb_record(), 0..24).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(idx, (name, tags, rssi, detections))| {
                let id = format!("dev-{idx}");
                let tags: Vec<&str> = tags.into_iter().collect();
                record(&id, name.map(|n| NAMES[n]), &tags, rssi, detections)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_rssi_has_one_band_and_bands_grow_with_distance(a in any::<i16>(), b in any::<i16>()) {
        let (strong, weak) = if a >= b { (a, b) } else { (b, a) };
        prop_assert!(ProximityBand::ALL.contains(&distance_band(a)));
        prop_assert!(distance_band(strong) <= distance_band(weak));
    }

    #[test]
    fn correlation_partitions_the_records(records in arb_records()) {
        let groups = correlate(&records, &APPLE_RULES).unwrap();

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.id.as_str()))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);

        let grouped: u64 = groups.iter().map(|g| g.detections).sum();
        let total: u64 = records.iter().map(|r| r.detections).sum();
        prop_assert_eq!(grouped, total);
    }

    #[test]
    fn groups_never_mix_incompatible_roles(records in arb_records()) {
        let groups = correlate(&records, &APPLE_RULES).unwrap();
        let empty = BTreeSet::new();
        for group in &groups {
            prop_assert!(APPLE_RULES.compatible(&group.tags, &empty), "group tags {:?}", group.tags);
        }
    }

    #[test]
    fn tracker_accumulates_every_event(rssis in prop::collection::vec(-110i16..-20, 1..40)) {
        let mut tracker = DeviceTracker::new(Arc::new(VendorTable::builtin()));
        for rssi in &rssis {
            tracker.observe(&AdvertisementEvent::new("same", *rssi), Local::now());
        }

        prop_assert_eq!(tracker.len(), 1);
        let record = tracker.get(&DeviceId::new("same")).unwrap();
        let last = *rssis.last().unwrap();
        prop_assert_eq!(record.detections, rssis.len() as u64);
        prop_assert_eq!(record.rssi, last);
        prop_assert_eq!(record.band, distance_band(last));
        prop_assert_eq!(record.max_rssi, *rssis.iter().max().unwrap());
        prop_assert_eq!(record.min_rssi, *rssis.iter().min().unwrap());
    }
}
