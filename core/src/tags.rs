//! Semantic type tags.
//!
//! Tags are plain strings so that vendor tables, service tables and the
//! correlation rules can share them without a central enum. The constants
//! below are the ones the rule tables refer to.

/// Apple Continuity message types (manufacturer data byte 2, vendor `004c`).
pub mod apple {
    pub const IBEACON: &str = "iBeacon";
    pub const AIRDROP: &str = "AirDrop";
    pub const AIRPODS: &str = "AirPods";
    pub const HEY_SIRI: &str = "Hey Siri";
    pub const AIRPLAY_TARGET: &str = "AirPlay Target";
    pub const AIRPLAY_SOURCE: &str = "AirPlay Source";
    pub const MAGIC_SWITCH: &str = "Magic Switch";
    pub const HANDOFF: &str = "Handoff";
    pub const TETHERING: &str = "Tethering";
    pub const NEARBY: &str = "Nearby";
    pub const FIND_MY: &str = "Find My";

    pub(crate) const SUB_TYPES: &[(u8, &str)] = &[
        (0x02, IBEACON),
        (0x05, AIRDROP),
        (0x07, AIRPODS),
        (0x08, HEY_SIRI),
        (0x09, AIRPLAY_TARGET),
        (0x0a, AIRPLAY_SOURCE),
        (0x0b, MAGIC_SWITCH),
        (0x0c, HANDOFF),
        (0x0d, TETHERING),
        (0x0e, TETHERING),
        (0x0f, NEARBY),
        (0x10, NEARBY),
        (0x12, FIND_MY),
    ];
}

/// Microsoft Beacon scenario types (vendor `0006`).
pub mod microsoft {
    pub const CDP_BEACON: &str = "CDP Beacon";
    pub const SWIFT_PAIR: &str = "Swift Pair";

    pub(crate) const SUB_TYPES: &[(u8, &str)] = &[(0x01, CDP_BEACON), (0x03, SWIFT_PAIR)];
}
