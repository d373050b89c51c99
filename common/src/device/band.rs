use std::fmt;

use serde::Serialize;

/// Coarse distance estimate derived from signal strength.
///
/// Variants are ordered from closest to farthest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ProximityBand {
    Immediate,
    Near,
    Medium,
    Far,
}

impl ProximityBand {
    pub const ALL: [ProximityBand; 4] = [
        ProximityBand::Immediate,
        ProximityBand::Near,
        ProximityBand::Medium,
        ProximityBand::Far,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProximityBand::Immediate => "0-2m",
            ProximityBand::Near => "2-10m",
            ProximityBand::Medium => "10-30m",
            ProximityBand::Far => "30m+",
        }
    }
}

impl fmt::Display for ProximityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
