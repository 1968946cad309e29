use std::collections::VecDeque;

use crate::types::{Axis, Sample};

/// The most recent `capacity` samples with their timestamp labels, oldest first.
///
/// Four parallel buffers that always have the same length.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    timestamps: VecDeque<String>,
    buffer_x: VecDeque<f64>,
    buffer_y: VecDeque<f64>,
    buffer_z: VecDeque<f64>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            timestamps: VecDeque::with_capacity(capacity + 1),
            buffer_x: VecDeque::with_capacity(capacity + 1),
            buffer_y: VecDeque::with_capacity(capacity + 1),
            buffer_z: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample, label: String) {
        self.timestamps.push_back(label);
        self.buffer_x.push_back(sample.x);
        self.buffer_y.push_back(sample.y);
        self.buffer_z.push_back(sample.z);

        while self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            self.buffer_x.pop_front();
            self.buffer_y.pop_front();
            self.buffer_z.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timestamps(&self) -> &VecDeque<String> {
        &self.timestamps
    }

    pub fn values(&self, axis: Axis) -> &VecDeque<f64> {
        match axis {
            Axis::X => &self.buffer_x,
            Axis::Y => &self.buffer_y,
            Axis::Z => &self.buffer_z,
        }
    }

    #[cfg(test)]
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.buffer_x
            .iter()
            .zip(&self.buffer_y)
            .zip(&self.buffer_z)
            .map(|((&x, &y), &z)| Sample::new(x, y, z))
    }

    pub fn latest(&self) -> Option<(Sample, &str)> {
        let label = self.timestamps.back()?;
        let sample = Sample::new(*self.buffer_x.back()?, *self.buffer_y.back()?, *self.buffer_z.back()?);
        Some((sample, label.as_str()))
    }
}
