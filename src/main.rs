use eframe::egui;
use eframe::egui_wgpu;

use trendplot::app::TrendPlotApp;
use trendplot::config::Config;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = Config::load();
    tracing::info!(
        model = %config.narrative.model,
        forecast_periods = config.analysis.forecast_periods,
        "Starting TrendPlot"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TrendPlot")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_drag_and_drop(true),
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                instance_descriptor: eframe::wgpu::InstanceDescriptor {
                    // DX12 first on Windows; Vulkan and GL as fallbacks.
                    backends: eframe::wgpu::Backends::DX12
                        | eframe::wgpu::Backends::VULKAN
                        | eframe::wgpu::Backends::GL,
                    ..Default::default()
                },
                power_preference: eframe::wgpu::PowerPreference::LowPower,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        "TrendPlot",
        options,
        Box::new(|cc| Ok(Box::new(TrendPlotApp::new(cc, config)?))),
    )
}
