use eframe::egui;

use crate::app::app_core::AccelGraphApp;
use crate::app::state::InputStatus;

pub fn render_status_bar(app: &mut AccelGraphApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(32.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Input:");

                let status_color = match app.state.input.status {
                    InputStatus::Waiting => egui::Color32::from_rgb(255, 165, 0),
                    InputStatus::Streaming => egui::Color32::from_rgb(0, 150, 0),
                    InputStatus::Closed | InputStatus::Failed(_) => egui::Color32::from_rgb(150, 0, 0),
                };
                ui.colored_label(status_color, app.state.get_status_summary());

                ui.separator();
                ui.label(app.state.fill_summary());

                ui.separator();
                ui.label(format!("Ticks: {}", app.state.ticks));

                ui.separator();
                ui.label(format!(
                    "Substituted: {}  Skipped: {}",
                    app.state.input.substituted, app.state.input.skipped
                ));

                if let Some((index, score)) = app.state.input.last_gesture {
                    ui.separator();
                    ui.label(format!("Gesture {:.0} ({:.2})", index, score));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Refresh: {} ms", app.state.clock.interval().as_millis()));
                });
            });
            ui.add_space(4.0);
        });
}

pub fn render_bottom_status_bar(app: &mut AccelGraphApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_status_bar")
        .min_height(22.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &app.state.input.last_diagnostic {
                    Some(line) => {
                        ui.label("Last notice:");
                        ui.colored_label(egui::Color32::from_rgb(200, 120, 0), line);
                    }
                    None => {
                        ui.weak("No notices");
                    }
                }

                if let Some((sample, label)) = app.state.window.latest() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(format!("{}  {:8.2} {:8.2} {:8.2}", label, sample.x, sample.y, sample.z));
                    });
                }
            });
        });
}
