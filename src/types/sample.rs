use serde::{Deserialize, Serialize};

/// One accelerometer reading, in the producer's units (mg).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Sample {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Sample> for [f64; 3] {
    fn from(s: Sample) -> Self {
        [s.x, s.y, s.z]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Panel order, top to bottom.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn title(&self) -> &'static str {
        match self {
            Axis::X => "X-Axis",
            Axis::Y => "Y-Axis",
            Axis::Z => "Z-Axis",
        }
    }
}
