use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 190, b: 230 };
pub const ACCENT: Color = Color::TrueColor { r: 250, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::TrueColor { r: 110, g: 110, b: 110 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const GOOD: Color = Color::TrueColor { r: 120, g: 210, b: 120 };
pub const DEGRADED: Color = Color::TrueColor { r: 235, g: 180, b: 70 };
pub const BAD: Color = Color::TrueColor { r: 230, g: 95, b: 95 };
