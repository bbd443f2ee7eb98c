use log::debug;
use serde::Serialize;

use super::bucket::LagBucket;
use crate::error::AnalysisError;

/// Slope of `msd = a·t` and its variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Fitted slope (m²/s).
    pub slope: f64,
    /// Variance of `slope`; infinite when only one point was fitted.
    pub variance: f64,
    /// Number of buckets used.
    pub points: usize,
}

impl FitResult {
    /// Fitted MSD at time `t`.
    pub fn predict(&self, t: f64) -> f64 {
        self.slope * t
    }
}

/// Unweighted least-squares fit through the origin over the first `window`
/// buckets. Bucket standard errors are not used as weights.
pub fn fit_through_origin(buckets: &[LagBucket], window: usize) -> Result<FitResult, AnalysisError> {
    let used = &buckets[..window.min(buckets.len())];
    if used.is_empty() {
        return Err(AnalysisError::EmptyCurve);
    }

    let sxx: f64 = used.iter().map(|b| b.elapsed * b.elapsed).sum();
    let sxy: f64 = used.iter().map(|b| b.elapsed * b.mean).sum();
    let slope = sxy / sxx;

    let n = used.len();
    let variance = if n > 1 {
        let rss: f64 = used
            .iter()
            .map(|b| (b.mean - slope * b.elapsed).powi(2))
            .sum();
        rss / (n - 1) as f64 / sxx
    } else {
        f64::INFINITY
    };

    debug!("fit over {n} buckets: slope {slope:e} m²/s, variance {variance:e}");
    Ok(FitResult {
        slope,
        variance,
        points: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(t: f64, msd: f64) -> LagBucket {
        LagBucket {
            elapsed: t,
            mean: msd,
            sem: 0.0,
            count: 1,
        }
    }

    #[test]
    fn exact_line_has_zero_variance() {
        let buckets: Vec<LagBucket> = (1..=5).map(|i| bucket(i as f64, 3.0 * i as f64)).collect();
        let fit = fit_through_origin(&buckets, 18).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-12);
        assert!(fit.variance.abs() < 1e-20);
        assert_eq!(fit.points, 5);
        assert!((fit.predict(10.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn only_leading_window_is_fitted() {
        let mut buckets: Vec<LagBucket> = (1..=3).map(|i| bucket(i as f64, 2.0 * i as f64)).collect();
        buckets.push(bucket(4.0, 1000.0));
        let fit = fit_through_origin(&buckets, 3).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert_eq!(fit.points, 3);
    }

    #[test]
    fn least_squares_slope_of_noisy_points() {
        // sxy = 1*1 + 2*5 = 11, sxx = 1 + 4 = 5
        let buckets = [bucket(1.0, 1.0), bucket(2.0, 5.0)];
        let fit = fit_through_origin(&buckets, 18).unwrap();
        assert!((fit.slope - 2.2).abs() < 1e-12);
        // residuals: -1.2, 0.6 → rss 1.8, / (n-1) / sxx
        assert!((fit.variance - 1.8 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_has_infinite_variance() {
        let fit = fit_through_origin(&[bucket(2.0, 4.0)], 18).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert!(fit.variance.is_infinite());
    }

    #[test]
    fn empty_curve_is_an_error() {
        assert!(matches!(
            fit_through_origin(&[], 18),
            Err(AnalysisError::EmptyCurve)
        ));
        assert!(matches!(
            fit_through_origin(&[bucket(1.0, 1.0)], 0),
            Err(AnalysisError::EmptyCurve)
        ));
    }
}
