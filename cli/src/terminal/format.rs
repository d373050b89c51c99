use colored::*;
use sniffr_common::device::band::ProximityBand;
use sniffr_common::device::event::Rssi;
use sniffr_common::device::record::DeviceRecord;
use sniffr_core::correlation::CorrelationGroup;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn band_to_colored(band: ProximityBand) -> ColoredString {
    let color = match band {
        ProximityBand::Immediate => colors::SIGNAL_STRONG,
        ProximityBand::Near => colors::SIGNAL_STRONG,
        ProximityBand::Medium => colors::SIGNAL_FAIR,
        ProximityBand::Far => colors::SIGNAL_WEAK,
    };
    band.label().color(color)
}

pub fn rssi_to_colored(rssi: Rssi) -> ColoredString {
    let color = match rssi {
        r if r >= -70 => colors::SIGNAL_STRONG,
        r if r >= -90 => colors::SIGNAL_FAIR,
        _ => colors::SIGNAL_WEAK,
    };
    format!("{rssi} dBm").color(color)
}

fn tags_to_colored<'a, I>(tags: I) -> Option<ColoredString>
where
    I: IntoIterator<Item = &'a String>,
{
    let joined = tags
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(", ");
    (!joined.is_empty()).then(|| joined.color(colors::TAG))
}

pub fn record_to_details(record: &DeviceRecord) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "Address".to_string(),
        record.display_identity().color(colors::ADDRESS),
    )];

    if let Some(info) = &record.manufacturer {
        let vendor = match &info.device_type {
            Some(device_type) => format!("{} ({})", info.vendor_name, device_type),
            None => info.vendor_name.clone(),
        };
        details.push(("Vendor".to_string(), vendor.color(colors::VENDOR)));
    }

    details.push((
        "Signal".to_string(),
        format!(
            "{} [{} .. {}] {}",
            rssi_to_colored(record.rssi),
            record.min_rssi,
            record.max_rssi,
            band_to_colored(record.band)
        )
        .normal(),
    ));

    if let Some(tags) = tags_to_colored(&record.tags) {
        details.push(("Tags".to_string(), tags));
    }

    if !record.services.is_empty() {
        details.push(("Services".to_string(), record.services.join(", ").normal()));
    }

    details.push((
        "Seen".to_string(),
        format!(
            "{}x, {} - {}",
            record.detections,
            record.first_seen.format("%H:%M:%S"),
            record.last_seen.format("%H:%M:%S")
        )
        .color(colors::TEXT_DEFAULT),
    ));

    details
}

pub fn group_to_details(group: &CorrelationGroup) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![("Type".to_string(), group.label.color(colors::ACCENT))];

    if let Some(tags) = tags_to_colored(&group.tags) {
        details.push(("Tags".to_string(), tags));
    }

    details.push((
        "Signal".to_string(),
        format!("{} (strongest)", rssi_to_colored(group.max_rssi)).normal(),
    ));

    let identities: Vec<String> = group.members.iter().map(DeviceRecord::display_identity).collect();
    details.push((
        "Members".to_string(),
        format!("{} ({})", group.members.len(), identities.join(", ")).color(colors::ADDRESS),
    ));
    details.push(("Seen".to_string(), format!("{}x", group.detections).normal()));

    details
}

pub fn group_title(group: &CorrelationGroup) -> String {
    match &group.name {
        Some(name) => name.clone(),
        None => format!("Unnamed {}", group.label),
    }
}
