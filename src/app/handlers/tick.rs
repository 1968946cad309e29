use crossbeam_channel::TryRecvError;
use log::{info, warn};

use crate::app::state::{AppState, InputStatus};
use crate::config::InputConfig;
use crate::logger::DIAGNOSTIC_TARGET;
use crate::parser::{parse_line, ParseError, ParsedLine};
use crate::types::{Diagnostic, InputEvent, Sample};

/// What one consumed input event did to the window.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Appended(Sample),
    /// A letter-led line was reported and the fallback sample appended.
    Substituted(Sample),
    /// The line did not parse; nothing was appended.
    Skipped(ParseError),
    /// Nothing queued.
    Idle,
    InputClosed,
}

pub struct TickHandler;

impl TickHandler {
    /// Runs one tick: consumes up to `lines_per_tick` queued lines and
    /// appends each parsed sample with a fresh timestamp label.
    pub fn handle_tick(
        state: &mut AppState,
        config: &InputConfig,
        label: &mut dyn FnMut() -> String,
    ) -> Vec<TickOutcome> {
        state.ticks += 1;
        let mut outcomes = Vec::with_capacity(config.lines_per_tick);
        for _ in 0..config.lines_per_tick {
            let outcome = Self::consume_one(state, config, label);
            let done = matches!(outcome, TickOutcome::Idle | TickOutcome::InputClosed);
            outcomes.push(outcome);
            if done {
                break;
            }
        }
        outcomes
    }

    fn consume_one(state: &mut AppState, config: &InputConfig, label: &mut dyn FnMut() -> String) -> TickOutcome {
        let event = match state.input.receiver.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return TickOutcome::Idle,
            Err(TryRecvError::Disconnected) => {
                if state.input.status.is_live() {
                    warn!("Reader stopped without closing the input");
                    state.input.status = InputStatus::Closed;
                }
                return TickOutcome::Idle;
            }
        };

        match event {
            InputEvent::Line(line) => Self::process_line(state, config, &line, label),
            InputEvent::Closed => {
                info!("Input closed after {} ticks, keeping last {} samples on screen", state.ticks, state.window.len());
                state.input.status = InputStatus::Closed;
                TickOutcome::InputClosed
            }
            InputEvent::Failed(e) => {
                state.input.status = InputStatus::Failed(e.to_string());
                TickOutcome::InputClosed
            }
        }
    }

    fn process_line(
        state: &mut AppState,
        config: &InputConfig,
        line: &str,
        label: &mut dyn FnMut() -> String,
    ) -> TickOutcome {
        state.input.status = InputStatus::Streaming;

        let parsed = match parse_line(line, config.fallback()) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Skipping line {:?}: {}", line.trim_end(), e);
                state.input.skipped += 1;
                return TickOutcome::Skipped(e);
            }
        };

        let sample = parsed.sample();
        state.window.push(sample, label());

        match parsed {
            ParsedLine::Sample(_) => TickOutcome::Appended(sample),
            ParsedLine::Malformed { line, diagnostic, .. } => {
                match diagnostic {
                    Diagnostic::Gesture { index, score } => {
                        info!(target: DIAGNOSTIC_TARGET, "{}", line);
                        state.input.last_gesture = Some((index, score));
                    }
                    Diagnostic::Message(message) => warn!(target: DIAGNOSTIC_TARGET, "{}", message),
                }
                state.input.last_diagnostic = Some(line);
                state.input.substituted += 1;
                TickOutcome::Substituted(sample)
            }
        }
    }
}
