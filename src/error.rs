use std::path::PathBuf;

use thiserror::Error;

/// Named failure conditions of the analysis.
///
/// Every one of these aborts the run; there is no partial result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("{}:{line}: malformed sample: {reason}", path.display())]
    MalformedSample {
        path: PathBuf,
        /// 1-based line of a delimited file, or 1-based row of a JSON array
        /// (the text line when the JSON itself does not parse).
        line: usize,
        reason: String,
    },

    #[error("trajectory {trajectory} has {found} sample(s), at least 2 are required")]
    InsufficientSamples { trajectory: String, found: usize },

    /// Sample `index` is not strictly later than the one before it.
    #[error("trajectory {trajectory}: sample {index} at t = {current} s does not follow t = {previous} s")]
    UnorderedTimes {
        trajectory: String,
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A zero mean-square displacement was about to be used as a divisor.
    #[error("zero mean-square displacement over elapsed time {elapsed} s")]
    DegenerateDisplacement { elapsed: f64 },

    #[error("no displacement observations to estimate from")]
    NoObservations,

    #[error("no MSD buckets available to fit")]
    EmptyCurve,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
