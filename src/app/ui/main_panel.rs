use eframe::egui;

use crate::app::app_core::AccelGraphApp;

pub fn render_main_panel(app: &mut AccelGraphApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let state = &app.state;
        state.plot.ui(ui, &state.window, &app.config.get_config().plot);
    });
}
