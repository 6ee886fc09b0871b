use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui;

use crate::config::Config;
use crate::data::loader;
use crate::data::observation::Observation;
use crate::data::presets::DataPreset;
use crate::error::LoadError;
use crate::narrative::GeminiNarrator;
use crate::orchestrator::{AnalysisPhase, Orchestrator};
use crate::state::app_state::{AppState, VERSION};
use crate::ui::data_source_bar::{self, SourceAction};
use crate::ui::report_card;
use crate::ui::stats_card;
use crate::ui::trend_chart::{self, TrendAction};

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Pending async file load result.
struct PendingLoad {
    name: String,
    result: Arc<Mutex<Option<Result<Vec<Observation>, LoadError>>>>,
}

/// The main TrendPlot application.
pub struct TrendPlotApp {
    pub state: AppState,
    orchestrator: Orchestrator,
    /// Drives the narrative requests. Declared after the orchestrator so
    /// in-flight requests are cancelled before the runtime shuts down.
    _runtime: tokio::runtime::Runtime,
    /// An error message to display briefly in the footer.
    pub error_message: Option<String>,
    /// Async file load in progress.
    pending_load: Option<PendingLoad>,
}

fn apply_rounding(visuals: &mut egui::Visuals) {
    visuals.window_corner_radius = egui::CornerRadius::same(8);
    visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);
    visuals.widgets.open.corner_radius = egui::CornerRadius::same(6);
}

impl TrendPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self, DynError> {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        apply_rounding(&mut style.visuals);
        ctx.set_style(style);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("trendplot-narrative")
            .enable_all()
            .build()?;
        let narrator = GeminiNarrator::new(config.narrative.clone())?;
        if config.narrative.api_key.is_none() {
            tracing::warn!("No API key configured; AI reports will show a fallback message");
        }
        let orchestrator = Orchestrator::new(
            runtime.handle().clone(),
            Arc::new(narrator),
            config.analysis.forecast_periods,
        );

        let mut app = Self::from_parts(orchestrator, runtime);
        app.select_preset(DataPreset::Sales);
        Ok(app)
    }

    fn from_parts(orchestrator: Orchestrator, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            state: AppState::new(),
            orchestrator,
            _runtime: runtime,
            error_message: None,
            pending_load: None,
        }
    }

    fn select_preset(&mut self, preset: DataPreset) {
        self.run_analysis(Some(preset), preset.label().to_string(), preset.observations());
    }

    /// Start an analysis. The preset highlight only follows a series that was
    /// accepted; a rejected one leaves the current report and highlight alone.
    fn run_analysis(
        &mut self,
        preset: Option<DataPreset>,
        source: String,
        series: Vec<Observation>,
    ) -> bool {
        if self.orchestrator.request(source, series).is_none() {
            self.error_message = Some("At least two observations are needed for a trend.".to_string());
            return false;
        }
        self.state.active_preset = preset;
        self.error_message = None;
        true
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Data Files", loader::SUPPORTED_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Parse a data file on a background thread so the UI stays responsive.
    fn load_file(&mut self, path: &Path) {
        let path_buf = path.to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result: Arc<Mutex<Option<Result<Vec<Observation>, LoadError>>>> =
            Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        std::thread::spawn(move || {
            let loaded = loader::load_file(&path_buf);
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(loaded);
            }
        });

        self.pending_load = Some(PendingLoad { name, result });
    }

    fn poll_pending_load(&mut self) {
        let Some(pending) = self.pending_load.as_ref() else {
            return;
        };
        let taken = match pending.result.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => Some(Err(LoadError::Io(std::io::Error::other(
                "file loader thread panicked",
            )))),
        };
        let Some(result) = taken else {
            return;
        };
        let name = pending.name.clone();
        self.pending_load = None;

        match result {
            Ok(series) => {
                self.run_analysis(None, name, series);
            }
            Err(e) => {
                tracing::error!("Failed to load {name}: {e}");
                self.error_message = Some(format!("Failed to load {name}: {e}"));
            }
        }
    }

    /// Export the current analysis to a CSV file via a save dialog.
    fn export_csv(&mut self) {
        let Some(report) = self.orchestrator.current() else {
            return;
        };
        let filename = format!("{}_trend.csv", report.source.replace(' ', "_"));
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&filename)
            .add_filter("CSV Files", &["csv"])
            .save_file()
        {
            if let Err(e) = loader::export_csv(&path, &report.analysis) {
                tracing::error!("Failed to export CSV: {e}");
                self.error_message = Some(format!("Failed to export CSV: {e}"));
            }
        }
    }
}

impl eframe::App for TrendPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut vis = self.state.theme.visuals();
        apply_rounding(&mut vis);
        ctx.set_visuals(vis);

        // ------------------------------------------------------------------
        // 1. Dropped files, background loads and the narrative request
        // ------------------------------------------------------------------
        let dropped: Option<std::path::PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .find(|p| loader::is_supported(p))
        });
        if let Some(path) = dropped {
            self.load_file(&path);
        }

        self.poll_pending_load();
        self.orchestrator.poll();

        if self.pending_load.is_some() || self.orchestrator.phase() == AnalysisPhase::Analyzing {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let report = self.orchestrator.current();
        let phase = self.orchestrator.phase();
        let theme = self.state.theme;

        // ------------------------------------------------------------------
        // 2. Panels
        // ------------------------------------------------------------------
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("TrendPlot");
                    ui.label(egui::RichText::new("Trend & derivative analysis").weak());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = format!("{} Mode", self.state.theme.toggle().label());
                        if ui.button(theme_label).clicked() {
                            self.state.theme = self.state.theme.toggle();
                        }
                        ui.separator();
                        ui.small(format!("v{VERSION}"));
                    });
                });
            });

        let mut source_action = SourceAction::None;
        egui::TopBottomPanel::top("data_source")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                source_action = data_source_bar::show_data_source_bar(
                    ui,
                    self.state.active_preset,
                    report.as_deref().map(|r| r.source.as_str()),
                    report.is_some(),
                );
            });

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(16, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status = match (&report, phase) {
                        (_, AnalysisPhase::Analyzing) => "Generating report...".to_string(),
                        (Some(r), AnalysisPhase::Idle) => format!("{} points", r.series.len()),
                        (None, AnalysisPhase::Idle) => "No data".to_string(),
                    };
                    ui.label(egui::RichText::new(status).weak());

                    if let Some(msg) = &self.error_message {
                        ui.separator();
                        ui.colored_label(theme.error(), msg);
                        if ui.small_button("dismiss").clicked() {
                            self.error_message = None;
                        }
                    }
                });
            });

        egui::SidePanel::right("insights")
            .resizable(true)
            .default_width(380.0)
            .min_width(300.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if let Some(report) = report.as_deref() {
                    stats_card::show_stats_card(ui, report, &theme);
                    ui.add_space(8.0);
                }
                report_card::show_report_card(ui, report.as_deref(), phase);
            });

        let mut trend_action = TrendAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            trend_action =
                trend_chart::show_trend_panel(ui, report.as_deref(), self.state.view, &theme);
        });

        if self.pending_load.is_some() {
            egui::Window::new("Loading")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading file...");
                    });
                });
        }

        // ------------------------------------------------------------------
        // 3. Process collected actions
        // ------------------------------------------------------------------
        match source_action {
            SourceAction::Preset(preset) => self.select_preset(preset),
            SourceAction::OpenFile => self.open_file_dialog(),
            SourceAction::ExportCsv => self.export_csv(),
            SourceAction::None => {}
        }
        if let TrendAction::ToggleView = trend_action {
            self.state.view = self.state.view.toggle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation::Observation;
    use crate::narrative::NarrativeGenerator;
    use crate::processing::statistics::StatisticsBundle;
    use futures::future::{BoxFuture, FutureExt};

    struct Quiet;

    impl NarrativeGenerator for Quiet {
        fn generate(&self, _: Vec<Observation>, _: StatisticsBundle) -> BoxFuture<'static, String> {
            async { String::from("report") }.boxed()
        }
    }

    fn app() -> TrendPlotApp {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let orchestrator = Orchestrator::new(runtime.handle().clone(), Arc::new(Quiet), 5);
        TrendPlotApp::from_parts(orchestrator, runtime)
    }

    #[test]
    fn test_rejected_file_keeps_preset_and_report() {
        let mut app = app();
        app.select_preset(DataPreset::Crypto);
        assert_eq!(app.state.active_preset, Some(DataPreset::Crypto));

        let accepted = app.run_analysis(
            None,
            "one_row.csv".to_string(),
            vec![Observation::new("a", 1.0)],
        );

        assert!(!accepted);
        assert_eq!(app.state.active_preset, Some(DataPreset::Crypto));
        assert!(app.error_message.is_some());
        let report = app.orchestrator.current().unwrap();
        assert_eq!(report.source, DataPreset::Crypto.label());
    }

    #[test]
    fn test_accepted_file_clears_preset() {
        let mut app = app();
        app.select_preset(DataPreset::Sales);
        app.error_message = Some("stale".to_string());

        let accepted = app.run_analysis(
            None,
            "two_rows.csv".to_string(),
            vec![Observation::new("a", 1.0), Observation::new("b", 2.0)],
        );

        assert!(accepted);
        assert_eq!(app.state.active_preset, None);
        assert!(app.error_message.is_none());
        assert_eq!(app.orchestrator.current().unwrap().source, "two_rows.csv");
    }
}
