//! Estimate Avogadro's number from recorded Brownian-motion trajectories.
//!
//! Trajectories of (t, x, y) samples are reduced to mean-square
//! displacements over short lags, which the Einstein relation turns into an
//! estimate of N_A. The full MSD-vs-time curve is also built, fitted with a
//! line through the origin and plotted.

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod report;
