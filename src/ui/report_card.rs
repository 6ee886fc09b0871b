use crate::orchestrator::{AnalysisPhase, AnalysisReport};

/// Render a markdown report line by line: headings, bullets and plain text.
fn show_markdown(ui: &mut egui::Ui, text: &str) {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            ui.add_space(4.0);
        } else if let Some(heading) = trimmed.strip_prefix('#') {
            ui.label(egui::RichText::new(heading.trim_start_matches('#').trim()).strong().size(16.0));
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            ui.label(format!("  \u{2022} {}", item.replace("**", "")));
        } else {
            ui.label(trimmed.replace("**", ""));
        }
    }
}

/// The narrative report, or a spinner while it is being generated.
pub fn show_report_card(ui: &mut egui::Ui, report: Option<&AnalysisReport>, phase: AnalysisPhase) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_height(ui.available_height());
            ui.heading("AI Report");
            ui.add_space(6.0);

            if phase == AnalysisPhase::Analyzing {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Analysing data and computing derivatives...").weak());
                });
                return;
            }

            match report.and_then(|r| r.narrative.as_deref().map(|n| (r, n))) {
                Some((report, narrative)) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        show_markdown(ui, narrative);
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new(format!(
                                "Generated {}",
                                report.created_at.format("%Y-%m-%d %H:%M:%S")
                            ))
                            .small()
                            .weak(),
                        );
                    });
                }
                None => {
                    ui.label(
                        egui::RichText::new("Load data to generate a trend report.").weak(),
                    );
                }
            }
        });
}
