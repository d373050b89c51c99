//! # Device Model
//!
//! Everything the scanning core knows about a nearby advertiser: the raw
//! [`event`] it receives, the accumulated [`record`] it keeps per identifier
//! and the coarse [`band`] used to express proximity.

pub mod band;
pub mod event;
pub mod record;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key under which a device is tracked for one scan session.
///
/// Either a stable hardware address or a surrogate id handed out by the radio
/// stack; the core treats both as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
