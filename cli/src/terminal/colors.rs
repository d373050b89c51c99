use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 130, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::TrueColor { r: 110, g: 110, b: 110 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };

pub const ADDRESS: Color = Color::TrueColor { r: 180, g: 140, b: 255 };
pub const VENDOR: Color = Color::TrueColor { r: 120, g: 220, b: 160 };
pub const TAG: Color = Color::TrueColor { r: 255, g: 150, b: 200 };

pub const SIGNAL_STRONG: Color = Color::Green;
pub const SIGNAL_FAIR: Color = Color::Yellow;
pub const SIGNAL_WEAK: Color = Color::Red;
