pub mod power_panel;
pub mod theme;
