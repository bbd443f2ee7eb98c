use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::displacement::DisplacementObservation;
use super::fit::FitResult;
use super::stats::mean_sem;
use crate::error::AnalysisError;

/// Physical conditions of the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalParams {
    /// Universal gas constant R (J/(mol·K)).
    pub gas_constant: f64,
    /// Temperature T (K).
    pub temperature: f64,
    /// Fluid viscosity η (Pa·s).
    pub viscosity: f64,
    /// Particle radius r (m).
    pub particle_radius: f64,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            gas_constant: 8.314,
            temperature: 290.0,
            viscosity: 0.0011,
            particle_radius: 0.52e-6,
        }
    }
}

impl PhysicalParams {
    /// `R·T / (3·π·η·r)`, the factor shared by every estimate.
    fn stokes_factor(&self) -> f64 {
        self.gas_constant * self.temperature
            / (3.0 * PI * self.viscosity * self.particle_radius)
    }

    /// Einstein relation for a planar walk: N = 2·t/msd · R·T/(3·π·η·r).
    pub fn avogadro_from_msd(&self, msd: f64, elapsed: f64) -> Result<f64, AnalysisError> {
        if msd == 0.0 {
            return Err(AnalysisError::DegenerateDisplacement { elapsed });
        }
        Ok(2.0 * elapsed / msd * self.stokes_factor())
    }

    /// Diffusion coefficient implied by a given Avogadro number.
    pub fn diffusion_for(&self, avogadro: f64) -> f64 {
        self.gas_constant * self.temperature
            / (avogadro * 6.0 * PI * self.viscosity * self.particle_radius)
    }
}

/// A derived value with its standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalEstimate {
    pub value: f64,
    pub standard_error: f64,
}

/// Mean and standard error of the per-observation Avogadro numbers.
///
/// Any zero MSD aborts with [`AnalysisError::DegenerateDisplacement`].
pub fn estimate_avogadro(
    observations: &[DisplacementObservation],
    params: &PhysicalParams,
) -> Result<PhysicalEstimate, AnalysisError> {
    let per_observation = observations
        .iter()
        .map(|o| params.avogadro_from_msd(o.squared_displacement, o.elapsed))
        .collect::<Result<Vec<f64>, _>>()?;

    let summary = mean_sem(&per_observation).ok_or(AnalysisError::NoObservations)?;
    Ok(PhysicalEstimate {
        value: summary.mean,
        standard_error: summary.sem,
    })
}

/// Avogadro number implied by a fitted MSD slope, error propagated from the
/// slope variance.
pub fn avogadro_from_slope(
    fit: &FitResult,
    params: &PhysicalParams,
) -> Result<PhysicalEstimate, AnalysisError> {
    // msd = a·t, so evaluate the relation at t = 1 s.
    let value = params.avogadro_from_msd(fit.slope, 1.0)?;
    let standard_error = (value * fit.variance.sqrt() / fit.slope).abs();
    Ok(PhysicalEstimate {
        value,
        standard_error,
    })
}
