use log::debug;

use super::displacement::{DisplacementObservation, all_pairs};
use crate::data::model::TrajectorySet;

/// Every sample pair of every trajectory, concatenated in trajectory order.
pub fn full_lag_observations(set: &TrajectorySet) -> Vec<DisplacementObservation> {
    let out: Vec<DisplacementObservation> = set
        .iter()
        .enumerate()
        .flat_map(|(index, traj)| all_pairs(traj, index))
        .collect();
    debug!(
        "full-lag observations: {} from {} samples",
        out.len(),
        set.total_samples()
    );
    out
}
