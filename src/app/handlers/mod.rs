pub mod tick;

pub use tick::{TickHandler, TickOutcome};
