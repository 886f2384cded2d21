use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x004be0c8);
pub const SECONDARY: Color = Color::from_u32(0x00217a6d);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000f1113);
pub const ERROR: Color = Color::from_u32(0x00f2545b);
