use log::debug;
use serde::Serialize;

use super::displacement::DisplacementObservation;
use super::stats::{mean, mean_sem};

/// One point of the MSD-vs-time curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LagBucket {
    /// Elapsed time shared by the bucket's observations (s).
    pub elapsed: f64,
    /// Mean squared displacement (m²).
    pub mean: f64,
    /// Standard error of `mean`.
    pub sem: f64,
    /// Number of observations in the bucket.
    pub count: usize,
}

/// How elapsed times are matched when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeKey {
    /// Bit-for-bit floating-point equality.
    #[default]
    Exact,
    /// Times falling on the same multiple of the tolerance share a bucket.
    Quantized(f64),
}

impl TimeKey {
    fn same(&self, a: f64, b: f64) -> bool {
        match *self {
            TimeKey::Exact => a == b,
            TimeKey::Quantized(tol) => (a / tol).round() == (b / tol).round(),
        }
    }
}

/// Group observations by elapsed time, ascending, one bucket per distinct key.
pub fn bucket_by_lag(observations: &[DisplacementObservation], key: TimeKey) -> Vec<LagBucket> {
    let mut sorted = observations.to_vec();
    sorted.sort_by(|a, b| a.elapsed.total_cmp(&b.elapsed));

    let mut buckets = Vec::new();
    let mut rest = sorted.as_slice();
    while let Some(head) = rest.first() {
        let len = rest
            .iter()
            .position(|o| !key.same(head.elapsed, o.elapsed))
            .unwrap_or(rest.len());
        let (group, tail) = rest.split_at(len);
        rest = tail;

        let displacements: Vec<f64> = group.iter().map(|o| o.squared_displacement).collect();
        let times: Vec<f64> = group.iter().map(|o| o.elapsed).collect();
        // `group` is never empty: `head` is always part of it.
        let Some(summary) = mean_sem(&displacements) else {
            continue;
        };
        let elapsed = match key {
            TimeKey::Exact => head.elapsed,
            TimeKey::Quantized(_) => mean(&times),
        };

        buckets.push(LagBucket {
            elapsed,
            mean: summary.mean,
            sem: summary.sem,
            count: summary.count,
        });
    }

    debug!(
        "bucketed {} observations into {} lags",
        observations.len(),
        buckets.len()
    );
    buckets
}
