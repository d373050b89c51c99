//! RSSI to proximity band.
//!
//! A plain step function: no smoothing, no hysteresis. Band edges belong to
//! the closer band, so `-50` is still `0-2m`.

use sniffr_common::device::band::ProximityBand;
use sniffr_common::device::event::Rssi;

pub const IMMEDIATE_THRESHOLD: Rssi = -50;
pub const NEAR_THRESHOLD: Rssi = -70;
pub const MEDIUM_THRESHOLD: Rssi = -90;

pub fn distance_band(rssi: Rssi) -> ProximityBand {
    if rssi >= IMMEDIATE_THRESHOLD {
        ProximityBand::Immediate
    } else if rssi >= NEAR_THRESHOLD {
        ProximityBand::Near
    } else if rssi >= MEDIUM_THRESHOLD {
        ProximityBand::Medium
    } else {
        ProximityBand::Far
    }
}
