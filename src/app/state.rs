use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::config::AppConfig;
use crate::plotter::AccelPlot;
use crate::types::InputEvent;
use crate::window::SampleWindow;

/// Where the input stream stands, as shown in the status bar.
#[derive(Debug, Clone, PartialEq)]
pub enum InputStatus {
    Waiting,
    Streaming,
    Closed,
    Failed(String),
}

impl InputStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, InputStatus::Waiting | InputStatus::Streaming)
    }
}

#[derive(Debug)]
pub struct InputState {
    pub receiver: Receiver<InputEvent>,
    pub status: InputStatus,
    pub last_diagnostic: Option<String>,
    pub last_gesture: Option<(f64, f64)>,
    /// Lines replaced by the fallback sample.
    pub substituted: u64,
    /// Lines dropped because a field did not parse.
    pub skipped: u64,
}

impl InputState {
    pub fn new(receiver: Receiver<InputEvent>) -> Self {
        Self {
            receiver,
            status: InputStatus::Waiting,
            last_diagnostic: None,
            last_gesture: None,
            substituted: 0,
            skipped: 0,
        }
    }
}

/// Fixed-period tick trigger driven by the GUI update loop.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    last: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
        }
    }
}

/// Everything the GUI mutates between frames.
#[derive(Debug)]
pub struct AppState {
    pub window: SampleWindow,
    pub input: InputState,
    pub clock: TickClock,
    pub ticks: u64,
    pub plot: AccelPlot,
}

impl AppState {
    pub fn new(receiver: Receiver<InputEvent>, config: &AppConfig) -> Self {
        Self {
            window: SampleWindow::new(config.plot.window_size),
            input: InputState::new(receiver),
            clock: TickClock::new(config.plot.refresh_interval()),
            ticks: 0,
            plot: AccelPlot::new(&config.plot),
        }
    }

    /// One-line summary for the status bar.
    pub fn get_status_summary(&self) -> String {
        match &self.input.status {
            InputStatus::Waiting => "Waiting for input".to_string(),
            InputStatus::Streaming => "Streaming".to_string(),
            InputStatus::Closed => "Input closed".to_string(),
            InputStatus::Failed(e) => format!("Input error: {}", e),
        }
    }

    pub fn fill_summary(&self) -> String {
        if self.window.is_empty() {
            return "Window: empty".to_string();
        }
        format!("Window: {}/{}", self.window.len(), self.window.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_due_immediately() {
        let clock = TickClock::new(Duration::from_millis(100));
        let now = Instant::now();
        assert!(clock.is_due(now));
        assert_eq!(clock.until_next(now), Duration::ZERO);
    }

    #[test]
    fn next_tick_waits_one_interval() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        let start = Instant::now();
        clock.mark(start);
        assert!(!clock.is_due(start + Duration::from_millis(40)));
        assert_eq!(clock.until_next(start + Duration::from_millis(40)), Duration::from_millis(60));
        assert!(clock.is_due(start + Duration::from_millis(100)));
        assert_eq!(clock.until_next(start + Duration::from_millis(250)), Duration::ZERO);
    }

    #[test]
    fn status_summary_reflects_input() {
        let (_tx, rx) = crossbeam_channel::bounded(1);
        let mut state = AppState::new(rx, &AppConfig::default());
        assert_eq!(state.get_status_summary(), "Waiting for input");
        state.input.status = InputStatus::Failed("broken pipe".into());
        assert_eq!(state.get_status_summary(), "Input error: broken pipe");
        assert!(!state.input.status.is_live());
    }

    #[test]
    fn fill_summary_tracks_window() {
        let (_tx, rx) = crossbeam_channel::bounded(1);
        let mut state = AppState::new(rx, &AppConfig::default());
        assert_eq!(state.fill_summary(), "Window: empty");
        state.window.push(crate::types::Sample::new(1.0, 2.0, 3.0), "t1".into());
        assert_eq!(state.fill_summary(), "Window: 1/20");
    }
}
