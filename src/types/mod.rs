pub mod sample;
pub mod diagnostic;
pub mod input_event;

pub use sample::{Axis, Sample};
pub use diagnostic::Diagnostic;
pub use input_event::InputEvent;
