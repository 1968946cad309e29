//! Emits accelerometer lines in the sensor bridge's format, for piping into
//! `accel-graph` without hardware:
//!
//! ```text
//! cargo run --bin accel_sim -- 100 | cargo run --bin accel-graph
//! ```
//!
//! The optional argument is the period between lines in milliseconds.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rand::Rng;

const DEFAULT_PERIOD_MS: u64 = 100;
/// Roughly one gesture notice per this many lines.
const GESTURE_EVERY: u32 = 50;

fn main() -> io::Result<()> {
    let period = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(DEFAULT_PERIOD_MS));

    let mut rng = rand::rng();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut t = 0.0f64;

    loop {
        let line = if rng.random_ratio(1, GESTURE_EVERY) {
            let index = rng.random_range(0..=5) as f64;
            let score: f64 = rng.random_range(0.0..1.0);
            format!("Gesture detected index {:04.2} score {:04.2}\r\n", index, score)
        } else {
            let x = 600.0 * (t * 0.7).sin() + rng.random_range(-40.0..40.0);
            let y = 400.0 * (t * 1.3).cos() + rng.random_range(-40.0..40.0);
            let z = 980.0 + rng.random_range(-60.0..60.0);
            format!("{:04.2},{:04.2},{:04.2}\r\n", x, y, z)
        };

        // the viewer closing its stdin ends the simulation
        match out.write_all(line.as_bytes()).and_then(|_| out.flush()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e),
        }

        t += period.as_secs_f64();
        thread::sleep(period);
    }
}
