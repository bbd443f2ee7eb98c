use anyhow::{Context, Result};
use log::{info, warn};

use crate::analysis::avogadro::{PhysicalEstimate, avogadro_from_slope, estimate_avogadro};
use crate::analysis::bucket::{LagBucket, bucket_by_lag};
use crate::analysis::displacement::DisplacementObservation;
use crate::analysis::fit::{FitResult, fit_through_origin};
use crate::analysis::full_lag::full_lag_observations;
use crate::analysis::short_lag::short_lag_observations;
use crate::config::Config;
use crate::data::loader::load_set;
use crate::data::model::TrajectorySet;

// ---------------------------------------------------------------------------
// Analysis – everything one run derives
// ---------------------------------------------------------------------------

/// Results of one run, independent of how they are reported.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Primary result, from the short-lag observations.
    pub estimate: PhysicalEstimate,

    /// Observations that fed `estimate`.
    pub short_lag: Vec<DisplacementObservation>,

    /// Every sample pair of every trajectory.
    pub observations: Vec<DisplacementObservation>,

    /// MSD curve, ascending in elapsed time.
    pub buckets: Vec<LagBucket>,

    /// Zero-intercept fit over the leading buckets.
    pub fit: FitResult,

    /// Cross-check from the fitted slope; `None` when the slope is zero.
    pub slope_estimate: Option<PhysicalEstimate>,

    /// Number of trajectories analysed.
    pub trajectories: usize,
}

/// Load the configured inputs and analyse them.
pub fn run(config: &Config) -> Result<Analysis> {
    let set = load_set(&config.inputs).context("loading trajectories")?;
    analyse(&set, config)
}

/// Run every stage on an already loaded set.
pub fn analyse(set: &TrajectorySet, config: &Config) -> Result<Analysis> {
    config.validate()?;

    let short_lag = short_lag_observations(set, config.short_lag_steps);
    let estimate = estimate_avogadro(&short_lag, &config.physics)
        .context("estimating Avogadro's number from short lags")?;
    info!(
        "{} short-lag observations → N = {:e} ± {:e}",
        short_lag.len(),
        estimate.value,
        estimate.standard_error
    );

    let observations = full_lag_observations(set);
    let buckets = bucket_by_lag(&observations, config.time_key());
    info!(
        "{} pair observations in {} time buckets",
        observations.len(),
        buckets.len()
    );

    let fit = fit_through_origin(&buckets, config.fit_buckets).context("fitting MSD curve")?;
    if fit.points < config.fit_buckets {
        warn!(
            "only {} buckets available, fewer than the {} requested for the fit",
            fit.points, config.fit_buckets
        );
    }

    let slope_estimate = match avogadro_from_slope(&fit, &config.physics) {
        Ok(est) => {
            info!(
                "slope {:e} m²/s → N = {:e} ± {:e}",
                fit.slope, est.value, est.standard_error
            );
            Some(est)
        }
        Err(e) => {
            warn!("no slope cross-check: {e}");
            None
        }
    };

    Ok(Analysis {
        estimate,
        short_lag,
        observations,
        buckets,
        fit,
        slope_estimate,
        trajectories: set.len(),
    })
}
