use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Sample – one recorded position
// ---------------------------------------------------------------------------

/// A single recorded particle position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time (s).
    pub t: f64,
    /// Horizontal position (m).
    pub x: f64,
    /// Vertical position (m).
    pub y: f64,
}

impl Sample {
    pub fn new(t: f64, x: f64, y: f64) -> Self {
        Sample { t, x, y }
    }

    /// Squared planar distance to `other`, summed per axis.
    pub fn squared_distance(&self, other: &Sample) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

// ---------------------------------------------------------------------------
// Trajectory – one tracked particle
// ---------------------------------------------------------------------------

/// An ordered path of one particle. Always holds at least two samples.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Human-readable origin (usually the file name).
    pub label: String,
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Build a trajectory, rejecting paths too short to yield a displacement
    /// and samples whose times do not strictly increase.
    pub fn new(label: impl Into<String>, samples: Vec<Sample>) -> Result<Self, AnalysisError> {
        let label = label.into();
        if samples.len() < 2 {
            return Err(AnalysisError::InsufficientSamples {
                trajectory: label,
                found: samples.len(),
            });
        }
        if let Some(k) = samples.windows(2).position(|w| w[1].t <= w[0].t) {
            return Err(AnalysisError::UnorderedTimes {
                trajectory: label,
                index: k + 1,
                previous: samples[k].t,
                current: samples[k + 1].t,
            });
        }
        Ok(Trajectory { label, samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TrajectorySet – everything loaded for one run
// ---------------------------------------------------------------------------

/// All trajectories of a run, in input order.
#[derive(Debug, Clone, Default)]
pub struct TrajectorySet {
    pub trajectories: Vec<Trajectory>,
}

impl TrajectorySet {
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        TrajectorySet { trajectories }
    }

    /// Number of trajectories.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Total number of samples across all trajectories.
    pub fn total_samples(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_have_zero_distance() {
        let s = Sample::new(0.0, 1.5e-6, -2.25e-6);
        assert_eq!(s.squared_distance(&s), 0.0);
    }

    #[test]
    fn squared_distance_sums_both_axes() {
        let a = Sample::new(0.0, 0.0, 0.0);
        let b = Sample::new(1.0, 3.0, 4.0);
        assert_eq!(a.squared_distance(&b), 25.0);
        assert_eq!(b.squared_distance(&a), 25.0);
    }

    #[test]
    fn single_sample_trajectory_is_rejected() {
        let err = Trajectory::new("short", vec![Sample::new(0.0, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientSamples { found: 1, .. }
        ));
    }

    #[test]
    fn decreasing_times_are_rejected() {
        let samples = vec![
            Sample::new(90.0, 3e-6, 0.0),
            Sample::new(60.0, 2e-6, 0.0),
            Sample::new(0.0, 0.0, 0.0),
        ];
        let err = Trajectory::new("backwards", samples).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnorderedTimes { index: 1, previous, current, .. }
                if previous == 90.0 && current == 60.0
        ));
    }

    #[test]
    fn repeated_time_is_rejected() {
        let samples = vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(30.0, 1e-6, 0.0),
            Sample::new(30.0, 2e-6, 0.0),
        ];
        let err = Trajectory::new("stalled", samples).unwrap_err();
        assert!(matches!(err, AnalysisError::UnorderedTimes { index: 2, .. }));
    }

    #[test]
    fn set_counts_samples_across_ragged_trajectories() {
        let a = Trajectory::new(
            "a",
            vec![Sample::new(0.0, 0.0, 0.0), Sample::new(1.0, 1.0, 0.0)],
        )
        .unwrap();
        let b = Trajectory::new(
            "b",
            (0..5).map(|i| Sample::new(i as f64, 0.0, 0.0)).collect(),
        )
        .unwrap();
        let set = TrajectorySet::new(vec![a, b]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_samples(), 7);
    }
}
