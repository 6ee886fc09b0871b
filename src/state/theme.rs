use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
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

    /// Observed values.
    pub fn observed(&self) -> Color32 {
        Color32::from_rgb(59, 130, 246)
    }

    /// Linear fit and its projection.
    pub fn linear(&self) -> Color32 {
        Color32::from_rgb(251, 146, 60)
    }

    /// Quadratic fit and its projection.
    pub fn quadratic(&self) -> Color32 {
        Color32::from_rgb(236, 72, 153)
    }

    pub fn positive(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(74, 222, 128),
            Theme::Light => Color32::from_rgb(22, 163, 74),
        }
    }

    pub fn negative(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(248, 113, 113),
            Theme::Light => Color32::from_rgb(220, 38, 38),
        }
    }

    /// Curvature `a` above zero.
    pub fn convex(&self) -> Color32 {
        Color32::from_rgb(96, 165, 250)
    }

    /// Curvature `a` at or below zero.
    pub fn concave(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(250, 204, 21),
            Theme::Light => Color32::from_rgb(202, 138, 4),
        }
    }

    pub fn error(&self) -> Color32 {
        Color32::from_rgb(255, 80, 80)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}
