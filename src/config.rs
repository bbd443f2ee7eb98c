use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::avogadro::PhysicalParams;
use crate::analysis::bucket::TimeKey;
use crate::error::AnalysisError;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "avogadro.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Chart output path (SVG).
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
    /// Draw every full-lag observation behind the bucket curve.
    pub show_observations: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("msd-t-perrin.svg"),
            width: 1024,
            height: 768,
            x_label: "Tempo (s)".to_string(),
            y_label: "Desvio Quadrático Médio (m²)".to_string(),
            show_observations: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trajectory files, one particle each.
    pub inputs: Vec<PathBuf>,
    pub physics: PhysicalParams,
    /// Lag steps `1..short_lag_steps` feed the Avogadro estimate.
    pub short_lag_steps: usize,
    /// Number of leading MSD buckets used by the linear fit.
    pub fit_buckets: usize,
    /// Group elapsed times on multiples of this value instead of exact
    /// equality.
    pub bucket_tolerance: Option<f64>,
    pub plot: PlotConfig,
    /// Where to write the JSON report, if anywhere.
    pub report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: (1..=3).map(|i| PathBuf::from(format!("traj{i}.txt"))).collect(),
            physics: PhysicalParams::default(),
            short_lag_steps: 5,
            fit_buckets: 18,
            bucket_tolerance: None,
            plot: PlotConfig::default(),
            report: None,
        }
    }
}

impl Config {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        let config = if path.is_file() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!("using settings from {}", path.display());
            config
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |msg: &str| Err(AnalysisError::InvalidConfig(msg.to_string()));

        if self.inputs.is_empty() {
            return invalid("at least one input trajectory is required");
        }
        if self.short_lag_steps < 2 {
            return invalid("short_lag_steps must be at least 2");
        }
        if self.fit_buckets == 0 {
            return invalid("fit_buckets must be positive");
        }
        if let Some(tol) = self.bucket_tolerance {
            if !(tol > 0.0 && tol.is_finite()) {
                return invalid("bucket_tolerance must be a positive number");
            }
        }
        let p = &self.physics;
        if [p.gas_constant, p.temperature, p.viscosity, p.particle_radius]
            .iter()
            .any(|v| !(*v > 0.0 && v.is_finite()))
        {
            return invalid("physical parameters must be positive");
        }
        Ok(())
    }

    pub fn time_key(&self) -> TimeKey {
        match self.bucket_tolerance {
            Some(tol) => TimeKey::Quantized(tol),
            None => TimeKey::Exact,
        }
    }
}
