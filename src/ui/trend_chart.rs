use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::orchestrator::AnalysisReport;
use crate::state::app_state::TrendView;
use crate::state::theme::Theme;

/// Actions that the trend panel can request from the parent.
pub enum TrendAction {
    None,
    ToggleView,
}

/// Render the trend panel: observed series, both fits and both projections,
/// or the same numbers as a table.
pub fn show_trend_panel(
    ui: &mut egui::Ui,
    report: Option<&AnalysisReport>,
    view: TrendView,
    theme: &Theme,
) -> TrendAction {
    let mut action = TrendAction::None;

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Trend & Projection");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = match view {
                        TrendView::Chart => "Table View",
                        TrendView::Table => "Chart View",
                    };
                    if ui
                        .add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
                        .on_hover_text("Toggle between chart and data table")
                        .clicked()
                    {
                        action = TrendAction::ToggleView;
                    }
                });
            });
            ui.add_space(4.0);

            let Some(report) = report else {
                ui.add_space(60.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(
                            "Pick a sample or drag-and-drop a CSV / Excel file to get started.",
                        )
                        .weak(),
                    );
                });
                return;
            };

            match view {
                TrendView::Chart => show_chart(ui, report, theme),
                TrendView::Table => show_table_view(ui, report),
            }
        });

    action
}

fn show_chart(ui: &mut egui::Ui, report: &AnalysisReport, theme: &Theme) {
    let analysis = &report.analysis;

    let observed: Vec<[f64; 2]> = analysis
        .merged
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.value])
        .collect();
    let linear: Vec<[f64; 2]> = analysis
        .merged
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.regression_value.map(|v| [i as f64, v]))
        .collect();
    let quadratic: Vec<[f64; 2]> = analysis
        .merged
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.quadratic_value.map(|v| [i as f64, v]))
        .collect();

    // Projections start at the last fitted point so the curves read as one.
    let n = analysis.merged.len();
    let mut linear_proj: Vec<[f64; 2]> = linear.last().copied().into_iter().collect();
    let mut quad_proj: Vec<[f64; 2]> = quadratic.last().copied().into_iter().collect();
    for (k, p) in analysis.forecast.iter().enumerate() {
        let x = (n + k) as f64;
        linear_proj.push([x, p.projection]);
        quad_proj.push([x, p.quadratic_projection]);
    }

    let labels: Vec<String> = analysis
        .merged
        .iter()
        .map(|p| p.label.clone())
        .chain(analysis.forecast.iter().map(|p| p.label.clone()))
        .collect();

    Plot::new("trend_plot")
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let x = mark.value;
            if x < 0.0 || (x - x.round()).abs() > 1e-6 {
                return String::new();
            }
            labels.get(x.round() as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(observed.clone()))
                    .name("Observed")
                    .color(theme.observed())
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(observed))
                    .name("Observed")
                    .color(theme.observed())
                    .radius(3.5),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(linear))
                    .name("Linear (line)")
                    .color(theme.linear())
                    .style(LineStyle::dashed_loose())
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(quadratic))
                    .name("Quadratic (curve)")
                    .color(theme.quadratic())
                    .style(LineStyle::dashed_dense())
                    .width(2.0),
            );
            if !analysis.forecast.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::from(linear_proj))
                        .name("Linear projection")
                        .color(theme.linear().gamma_multiply(0.7))
                        .style(LineStyle::dotted_dense())
                        .width(2.0),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(quad_proj))
                        .name("Quadratic projection")
                        .color(theme.quadratic().gamma_multiply(0.7))
                        .style(LineStyle::dotted_dense())
                        .width(2.0),
                );
            }
        });
}

fn fmt_cell(ui: &mut egui::Ui, v: Option<f64>) {
    match v {
        Some(v) if v.is_finite() => ui.label(format!("{v:.3}")),
        _ => ui.label("-"),
    };
}

fn show_table_view(ui: &mut egui::Ui, report: &AnalysisReport) {
    use egui_extras::{Column, TableBuilder};

    const HEADERS: [&str; 8] = [
        "Label",
        "Value",
        "Velocity",
        "Acceleration",
        "Linear",
        "Quadratic",
        "Linear Proj.",
        "Quadratic Proj.",
    ];

    let merged = &report.analysis.merged;
    let forecast = &report.analysis.forecast;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(90.0), HEADERS.len())
        .min_scrolled_height(300.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, merged.len() + forecast.len(), |mut row| {
                let idx = row.index();
                if let Some(p) = merged.get(idx) {
                    row.col(|ui| {
                        ui.label(&p.label);
                    });
                    for v in [
                        Some(p.value),
                        p.velocity,
                        p.acceleration,
                        p.regression_value,
                        p.quadratic_value,
                        None,
                        None,
                    ] {
                        row.col(|ui| fmt_cell(ui, v));
                    }
                } else if let Some(p) = forecast.get(idx - merged.len()) {
                    row.col(|ui| {
                        ui.label(egui::RichText::new(&p.label).italics());
                    });
                    for v in [
                        None,
                        None,
                        None,
                        None,
                        None,
                        Some(p.projection),
                        Some(p.quadratic_projection),
                    ] {
                        row.col(|ui| fmt_cell(ui, v));
                    }
                }
            });
        });
}
