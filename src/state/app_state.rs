use crate::data::presets::DataPreset;
use crate::state::theme::Theme;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether the trend panel shows the chart or the data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendView {
    #[default]
    Chart,
    Table,
}

impl TrendView {
    pub fn toggle(&self) -> Self {
        match self {
            TrendView::Chart => TrendView::Table,
            TrendView::Table => TrendView::Chart,
        }
    }
}

/// UI-only state. The analysis itself lives in the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub theme: Theme,
    pub view: TrendView,
    /// Preset currently shown, if the data did not come from a file.
    pub active_preset: Option<DataPreset>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
