use crate::orchestrator::AnalysisReport;
use crate::processing::statistics::{Concavity, FitStatus, SeriesSummary};
use crate::state::theme::Theme;

fn metric(ui: &mut egui::Ui, name: &str, value: String, color: Option<egui::Color32>) {
    ui.label(egui::RichText::new(name).weak());
    let text = egui::RichText::new(value).monospace().strong();
    ui.label(match color {
        Some(c) => text.color(c),
        None => text,
    });
    ui.end_row();
}

fn status_note(ui: &mut egui::Ui, status: FitStatus) {
    let note = match status {
        FitStatus::Fitted => return,
        FitStatus::InsufficientData => "Not enough points for this model.",
        FitStatus::Singular => "No unique fit; coefficients reported as zero.",
    };
    ui.label(egui::RichText::new(note).small().weak());
}

/// Model metrics and the automatic diagnosis.
pub fn show_stats_card(ui: &mut egui::Ui, report: &AnalysisReport, theme: &Theme) {
    let stats = report.analysis.statistics();

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.heading("Model Metrics");
            ui.add_space(6.0);

            ui.label(
                egui::RichText::new("LINEAR MODEL (1st order)")
                    .small()
                    .strong()
                    .color(theme.linear()),
            );
            egui::Grid::new("linear_metrics")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    let slope_color = if stats.slope() >= 0.0 {
                        theme.positive()
                    } else {
                        theme.negative()
                    };
                    metric(ui, "Slope", format!("{:.4}", stats.slope()), Some(slope_color));
                    metric(ui, "Intercept", format!("{:.4}", stats.linear.intercept), None);
                    metric(ui, "R² (linear)", format!("{:.4}", stats.lin_r_squared()), None);
                });
            status_note(ui, stats.linear.status);

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("QUADRATIC MODEL (2nd order)")
                    .small()
                    .strong()
                    .color(theme.quadratic()),
            );
            egui::Grid::new("quadratic_metrics")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    let a_color = if stats.quad_a() > 0.0 {
                        theme.convex()
                    } else {
                        theme.concave()
                    };
                    metric(ui, "Curvature (a)", format!("{:.5}", stats.quad_a()), Some(a_color));
                    let r2_color = stats.quadratic_preferred().then(|| theme.positive());
                    metric(ui, "R² (curve)", format!("{:.4}", stats.quad_r_squared()), r2_color);
                    metric(
                        ui,
                        "Avg. acceleration",
                        format!("{:.4}", stats.avg_acceleration()),
                        None,
                    );
                });
            status_note(ui, stats.quadratic.status);

            ui.add_space(8.0);
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("AUTOMATIC DIAGNOSIS").small().weak());
                    let color = match stats.concavity() {
                        Concavity::Linear => ui.visuals().strong_text_color(),
                        Concavity::Convex => theme.convex(),
                        Concavity::Concave => theme.concave(),
                    };
                    ui.label(
                        egui::RichText::new(stats.concavity().diagnosis())
                            .strong()
                            .color(color),
                    );
                });

            if let Some(summary) = SeriesSummary::compute(&report.series) {
                ui.add_space(6.0);
                ui.collapsing("Series summary", |ui| {
                    ui.label(egui::RichText::new(summary.report(&report.source)).monospace());
                });
            }
        });
}
