use crate::data::presets::DataPreset;

/// Actions the data source bar can request from the app.
pub enum SourceAction {
    None,
    Preset(DataPreset),
    OpenFile,
    ExportCsv,
}

/// Helper to create a toolbar button with consistent min size.
fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

fn toolbar_toggle_btn(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let btn = if active {
        egui::Button::new(egui::RichText::new(label).strong())
            .fill(ui.visuals().selection.bg_fill)
            .min_size(egui::vec2(0.0, 26.0))
    } else {
        egui::Button::new(label).min_size(egui::vec2(0.0, 26.0))
    };
    ui.add(btn)
}

/// Render preset, open and export controls.
pub fn show_data_source_bar(
    ui: &mut egui::Ui,
    active_preset: Option<DataPreset>,
    source: Option<&str>,
    can_export: bool,
) -> SourceAction {
    let mut action = SourceAction::None;

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        ui.label(egui::RichText::new("Samples").strong());
        for preset in DataPreset::ALL {
            if toolbar_toggle_btn(ui, preset.label(), active_preset == Some(preset)).clicked() {
                action = SourceAction::Preset(preset);
            }
        }

        ui.separator();

        if toolbar_btn(ui, "Open File")
            .on_hover_text("Import a CSV or Excel file with Label,Value columns")
            .clicked()
        {
            action = SourceAction::OpenFile;
        }
        let export = ui.add_enabled(
            can_export,
            egui::Button::new("Export CSV").min_size(egui::vec2(0.0, 26.0)),
        );
        if export.on_hover_text("Save the analysed series and forecast").clicked() {
            action = SourceAction::ExportCsv;
        }

        if let Some(source) = source {
            ui.separator();
            ui.label(egui::RichText::new(format!("Source: {source}")).weak());
        }
    });

    action
}
