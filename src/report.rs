use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::analysis::avogadro::PhysicalEstimate;
use crate::analysis::bucket::LagBucket;
use crate::analysis::fit::FitResult;
use crate::pipeline::Analysis;

// ---------------------------------------------------------------------------
// Console line
// ---------------------------------------------------------------------------

/// Scientific notation in the C `%.{precision}e` style: signed exponent of at
/// least two digits (`6.4e+23`, `3e+22`, `1.0e-05`).
pub fn format_sci(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let rust = format!("{value:.precision$e}");
    match rust.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => rust,
    }
}

/// `N_Avogadro = <value> +/- <uncertainty>`
pub fn summary_line(estimate: &PhysicalEstimate) -> String {
    format!(
        "N_Avogadro = {} +/- {}",
        format_sci(estimate.value, 1),
        format_sci(estimate.standard_error, 0)
    )
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Report<'a> {
    trajectories: usize,
    avogadro: &'a PhysicalEstimate,
    short_lag_observations: usize,
    pair_observations: usize,
    fit: &'a FitResult,
    avogadro_from_slope: Option<&'a PhysicalEstimate>,
    curve: &'a [LagBucket],
}

/// Write the numeric results of `analysis` as pretty-printed JSON.
pub fn write_json(path: &Path, analysis: &Analysis) -> Result<()> {
    let report = Report {
        trajectories: analysis.trajectories,
        avogadro: &analysis.estimate,
        short_lag_observations: analysis.short_lag.len(),
        pair_observations: analysis.observations.len(),
        fit: &analysis.fit,
        avogadro_from_slope: analysis.slope_estimate.as_ref(),
        curve: &analysis.buckets,
    };
    let text = serde_json::to_string_pretty(&report).context("serializing report")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_printf_exponent_style() {
        assert_eq!(format_sci(6.4321e23, 1), "6.4e+23");
        assert_eq!(format_sci(2.7e22, 0), "3e+22");
        assert_eq!(format_sci(1.0e-5, 1), "1.0e-05");
        assert_eq!(format_sci(0.0, 1), "0.0e+00");
        assert_eq!(format_sci(-1.25e100, 2), "-1.25e+100");
    }

    #[test]
    fn summary_line_layout() {
        let est = PhysicalEstimate {
            value: 6.1e23,
            standard_error: 4.2e22,
        };
        assert_eq!(summary_line(&est), "N_Avogadro = 6.1e+23 +/- 4e+22");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(format_sci(f64::INFINITY, 1), "inf");
        assert_eq!(format_sci(f64::NAN, 0), "NaN");
    }
}
