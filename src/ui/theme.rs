use egui::{Color32, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn ac_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(90, 150, 255),
            Theme::Light => Color32::from_rgb(0, 0, 200),
        }
    }

    pub fn dc_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(90, 210, 110),
            Theme::Light => Color32::from_rgb(0, 140, 0),
        }
    }

    /// Smoothed derived power. The raw derived line uses the same hue, faded.
    pub fn derived_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(255, 90, 90),
            Theme::Light => Color32::from_rgb(210, 0, 0),
        }
    }

    pub fn derived_raw_color(&self) -> Color32 {
        self.derived_color().gamma_multiply(0.3)
    }
}
