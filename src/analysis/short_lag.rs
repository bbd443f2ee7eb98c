use log::debug;

use super::displacement::{DisplacementObservation, consecutive, subsample};
use crate::data::model::{Trajectory, TrajectorySet};

/// Short-lag MSD observations.
///
/// For every lag step `i` in `1..steps` and offset `j` in `0..i`, the
/// trajectory is sub-sampled to every `i`-th sample starting at `j`. The
/// squared consecutive increments of that sub-sequence are averaged into one
/// MSD value, paired with the duration of its first step. Sub-sequences with
/// fewer than two samples contribute nothing.
pub fn short_lag_observations(set: &TrajectorySet, steps: usize) -> Vec<DisplacementObservation> {
    let out: Vec<DisplacementObservation> = set
        .iter()
        .enumerate()
        .flat_map(|(index, traj)| trajectory_observations(traj, index, steps))
        .collect();
    debug!("short-lag observations: {} (lag steps < {steps})", out.len());
    out
}

fn trajectory_observations(
    traj: &Trajectory,
    index: usize,
    steps: usize,
) -> Vec<DisplacementObservation> {
    let mut out = Vec::new();
    for step in 1..steps {
        for offset in 0..step {
            let sub = subsample(traj, step, offset);
            let increments = consecutive(&sub, index);
            let Some(first) = increments.first() else {
                continue;
            };
            // Per-axis averages summed; equal to the mean planar increment.
            let msd = increments
                .iter()
                .map(|o| o.squared_displacement)
                .sum::<f64>()
                / increments.len() as f64;
            out.push(DisplacementObservation {
                squared_displacement: msd,
                elapsed: first.elapsed,
                trajectory: index,
            });
        }
    }
    out
}
