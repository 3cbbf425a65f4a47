//! Simulated trajectory type.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// One Monte Carlo trajectory over the simulation time grid.
///
/// Index 0 holds the value at time 0 (the model's initial value), the
/// last index holds the value at the horizon. A path belongs to exactly
/// one scenario and one risk factor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    values: Vec<f64>,
}

impl Path {
    /// Wraps a value vector as a path.
    #[inline]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Creates an empty path with capacity for `n` points.
    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            values: Vec::with_capacity(n),
        }
    }

    /// Appends a value at the next grid index.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Number of grid points on this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at grid index `j`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// The underlying values, index 0 first.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at time 0, i.e. the model's initial value.
    #[inline]
    pub fn initial_value(&self) -> Option<f64> {
        self.values.first().copied()
    }
}

impl Index<usize> for Path {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}
