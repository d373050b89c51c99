//! Human labels for a set of type tags.
//!
//! Rules are evaluated top to bottom and the first hit wins. Name rules come
//! before tag rules, and combined tag rules before their single-tag
//! counterparts.

use std::collections::BTreeSet;

use crate::tags::apple;

#[derive(Debug, Clone, Copy)]
pub enum LabelRule {
    /// Case-insensitive substring of the advertised name.
    NameContains(&'static str, &'static str),
    /// Every listed tag is present.
    HasTags(&'static [&'static str], &'static str),
}

impl LabelRule {
    fn apply(&self, tags: &BTreeSet<String>, name: Option<&str>) -> Option<&'static str> {
        match self {
            LabelRule::NameContains(needle, label) => name
                .filter(|name| name.to_lowercase().contains(needle))
                .map(|_| *label),
            LabelRule::HasTags(required, label) => required
                .iter()
                .all(|tag| tags.contains(*tag))
                .then_some(*label),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelRules {
    pub rules: &'static [LabelRule],
    pub fallback: &'static str,
}

impl LabelRules {
    pub fn infer(&self, tags: &BTreeSet<String>, name: Option<&str>) -> &'static str {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(tags, name))
            .unwrap_or(self.fallback)
    }
}

pub const APPLE_LABELS: LabelRules = LabelRules {
    rules: &[
        LabelRule::NameContains("airpods", "AirPods"),
        LabelRule::NameContains("beats", "Beats Headphones"),
        LabelRule::NameContains("iphone", "iPhone"),
        LabelRule::NameContains("ipad", "iPad"),
        LabelRule::NameContains("watch", "Apple Watch"),
        LabelRule::NameContains("homepod", "HomePod"),
        LabelRule::NameContains("apple tv", "Apple TV"),
        LabelRule::NameContains("macbook", "MacBook"),
        LabelRule::NameContains("imac", "iMac"),
        LabelRule::NameContains("mac", "Mac"),
        LabelRule::HasTags(&[apple::AIRPLAY_SOURCE, apple::HANDOFF], "Mac / iPad"),
        LabelRule::HasTags(&[apple::AIRPLAY_SOURCE], "AirPlay Sender"),
        LabelRule::HasTags(&[apple::AIRPLAY_TARGET, apple::HEY_SIRI], "HomePod"),
        LabelRule::HasTags(&[apple::AIRPLAY_TARGET], "Apple TV / AirPlay Receiver"),
        LabelRule::HasTags(&[apple::AIRPODS], "AirPods / Beats"),
        LabelRule::HasTags(&[apple::HANDOFF, apple::FIND_MY], "iPhone"),
        LabelRule::HasTags(&[apple::HANDOFF, apple::NEARBY], "iPhone / iPad"),
        LabelRule::HasTags(&[apple::HANDOFF], "Mac / iPhone / iPad"),
        LabelRule::HasTags(&[apple::HEY_SIRI], "Siri Device"),
        LabelRule::HasTags(&[apple::TETHERING], "iPhone (Hotspot)"),
        LabelRule::HasTags(&[apple::NEARBY], "iPhone / iPad"),
        LabelRule::HasTags(&[apple::MAGIC_SWITCH], "Apple Watch"),
        LabelRule::HasTags(&[apple::AIRDROP], "AirDrop Device"),
        LabelRule::HasTags(&[apple::IBEACON], "iBeacon"),
        LabelRule::HasTags(&[apple::FIND_MY], "Find My Accessory"),
    ],
    fallback: "Apple Device",
};

/// Label for an Apple device from its accumulated tags and optional name.
pub fn infer_apple_label(tags: &BTreeSet<String>, name: Option<&str>) -> &'static str {
    APPLE_LABELS.infer(tags, name)
}
