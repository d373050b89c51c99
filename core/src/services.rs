//! GATT service identifiers to names and type tags.
//!
//! Identifiers arrive either as 16-bit short forms (`180f`) or as full
//! 128-bit UUIDs built on the Bluetooth base UUID
//! (`0000180f-0000-1000-8000-00805f9b34fb`).

const SERVICE_NAMES: &[(&str, &str)] = &[
    ("1800", "Generic Access"),
    ("1801", "Generic Attribute"),
    ("180a", "Device Information"),
    ("180d", "Heart Rate"),
    ("180f", "Battery"),
    ("1812", "Human Interface Device"),
    ("181c", "User Data"),
    ("1826", "Fitness Machine"),
    ("fd5a", "Samsung SmartTag"),
    ("fd6f", "Exposure Notification"),
    ("fe2c", "Google Fast Pair"),
    ("fe9f", "Google"),
    ("feaa", "Eddystone"),
    ("febe", "Bose"),
    ("feed", "Tile"),
];

const SERVICE_TAGS: &[(&str, &str)] = &[
    ("180d", "Heart Rate Monitor"),
    ("1812", "Input Device"),
    ("1826", "Fitness Equipment"),
    ("fd5a", "SmartTag"),
    ("fd6f", "Exposure Notification"),
    ("fe2c", "Fast Pair"),
    ("feaa", "Eddystone Beacon"),
    ("feed", "Tile Tracker"),
];

/// Digits 4..8 of a long UUID: the 16-bit alias on the base UUID.
fn short_form(service: &str) -> Option<&str> {
    if service.len() > 8 {
        service.get(4..8)
    } else {
        None
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], service: &str) -> Option<&'static str> {
    let service = service.to_ascii_lowercase();
    let find = |key: &str| {
        table
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    };
    find(service.as_str()).or_else(|| short_form(&service).and_then(find))
}

/// Resolves service identifiers to names, keeping unknown ones verbatim.
pub fn resolve_service_names(services: &[String]) -> Vec<String> {
    services
        .iter()
        .map(|service| match lookup(SERVICE_NAMES, service) {
            Some(name) => name.to_string(),
            None => service.clone(),
        })
        .collect()
}

/// Type tag of the first service (in advertised order) found in the tag table.
pub fn infer_service_tag(services: &[String]) -> Option<String> {
    services
        .iter()
        .find_map(|service| lookup(SERVICE_TAGS, service))
        .map(str::to_string)
}
