//! Squared planar displacements between samples of one trajectory.
//!
//! Two modes: lag-stepped sub-sequences (`subsample` + `consecutive`) used by
//! the short-lag estimator, and the exhaustive pair enumeration (`all_pairs`)
//! used to build the full MSD curve.

use crate::data::model::{Sample, Trajectory};

/// One squared displacement paired with the real time it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementObservation {
    /// Squared displacement (m²).
    pub squared_displacement: f64,
    /// Elapsed time between the two samples (s).
    pub elapsed: f64,
    /// Index of the source trajectory within its set.
    pub trajectory: usize,
}

impl DisplacementObservation {
    pub fn between(a: &Sample, b: &Sample, trajectory: usize) -> Self {
        DisplacementObservation {
            squared_displacement: a.squared_distance(b),
            elapsed: b.t - a.t,
            trajectory,
        }
    }
}

/// Every `step`-th sample starting at `offset`.
///
/// The result has `ceil((n - offset) / step)` samples, or none when
/// `offset >= n`. `step` must be positive.
pub fn subsample(trajectory: &Trajectory, step: usize, offset: usize) -> Vec<Sample> {
    debug_assert!(step > 0, "lag step must be positive");
    trajectory
        .samples()
        .iter()
        .skip(offset)
        .step_by(step.max(1))
        .copied()
        .collect()
}

/// Displacement between each consecutive pair of `samples`.
///
/// Fewer than two samples yields nothing.
pub fn consecutive(samples: &[Sample], trajectory: usize) -> Vec<DisplacementObservation> {
    samples
        .windows(2)
        .map(|w| DisplacementObservation::between(&w[0], &w[1], trajectory))
        .collect()
}

/// Displacement between every pair `(i, j)` with `j > i`.
///
/// O(n²) in the number of samples.
pub fn all_pairs(trajectory: &Trajectory, index: usize) -> Vec<DisplacementObservation> {
    let samples = trajectory.samples();
    let n = samples.len();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            out.push(DisplacementObservation::between(a, b, index));
        }
    }
    out
}
