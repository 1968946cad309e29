use std::time::Instant;

use crossbeam_channel::Receiver;
use eframe::{egui, Frame};
use log::{debug, info};

use super::handlers::{TickHandler, TickOutcome};
use super::state::AppState;
use crate::config::ConfigManager;
use crate::types::InputEvent;
use crate::utils::now_label;

pub struct AccelGraphApp {
    pub state: AppState,
    pub config: ConfigManager,
}

impl AccelGraphApp {
    pub fn new(receiver: Receiver<InputEvent>, config: ConfigManager) -> Self {
        let state = AppState::new(receiver, config.get_config());
        if let Some(path) = config.config_path() {
            info!("Using config {}", path.display());
        }
        info!(
            "Plotting last {} samples, refreshing every {} ms",
            state.window.capacity(),
            state.clock.interval().as_millis()
        );
        Self { state, config }
    }

    fn run_tick(&mut self, now: Instant) {
        self.state.clock.mark(now);
        let outcomes = TickHandler::handle_tick(&mut self.state, &self.config.get_config().input, &mut now_label);
        for outcome in &outcomes {
            if let TickOutcome::Appended(s) | TickOutcome::Substituted(s) = outcome {
                debug!("tick {}: x={:.2} y={:.2} z={:.2}", self.state.ticks, s.x, s.y, s.z);
            }
        }
    }
}

impl eframe::App for AccelGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = Instant::now();
        if self.state.clock.is_due(now) {
            self.run_tick(now);
        }

        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_bottom_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        ctx.request_repaint_after(self.state.clock.until_next(Instant::now()));
    }
}
