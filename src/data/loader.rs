use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info};

use super::model::{Sample, Trajectory, TrajectorySet};
use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one trajectory from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.txt` / `.csv` / `.dat` – header-less, comma-separated `t,x,y` rows
/// * `.json`                  – `[[t, x, y], ...]`
pub fn load_file(path: &Path) -> Result<Trajectory> {
    if !path.is_file() {
        return Err(AnalysisError::MissingInputFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let samples = match ext.as_str() {
        "txt" | "csv" | "dat" => load_delimited(path)?,
        "json" => load_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let label = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trajectory")
        .to_string();

    let trajectory = Trajectory::new(label, samples)?;
    info!(
        "loaded {} ({} samples)",
        path.display(),
        trajectory.len()
    );
    Ok(trajectory)
}

/// Load every file into a [`TrajectorySet`], keeping the order of `paths`.
pub fn load_set<P: AsRef<Path>>(paths: &[P]) -> Result<TrajectorySet> {
    let trajectories = paths
        .iter()
        .map(|p| load_file(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(TrajectorySet::new(trajectories))
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Layout: no header row, one sample per line, three comma-separated floats
/// `t,x,y`. Blank lines are ignored.
fn load_delimited(path: &Path) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut samples = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("reading {} row {row_no}", path.display()))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_no + 1);

        let malformed = |reason: String| AnalysisError::MalformedSample {
            path: path.to_path_buf(),
            line,
            reason,
        };

        if record.len() != 3 {
            return Err(malformed(format!("expected 3 columns, found {}", record.len())).into());
        }

        let mut values = [0.0f64; 3];
        for (slot, (col, field)) in values.iter_mut().zip(["t", "x", "y"].iter().zip(record.iter())) {
            *slot = parse_finite(field).map_err(|reason| malformed(format!("{col}: {reason}")))?;
        }

        push_in_order(&mut samples, Sample::new(values[0], values[1], values[2]))
            .map_err(malformed)?;
    }

    debug!("{}: parsed {} rows", path.display(), samples.len());
    Ok(samples)
}

/// Append `sample` unless its time does not follow the last one.
fn push_in_order(samples: &mut Vec<Sample>, sample: Sample) -> std::result::Result<(), String> {
    if let Some(prev) = samples.last() {
        if sample.t <= prev.t {
            return Err(format!(
                "t = {} does not follow previous t = {}",
                sample.t, prev.t
            ));
        }
    }
    samples.push(sample);
    Ok(())
}

fn parse_finite(tok: &str) -> std::result::Result<f64, String> {
    let value = tok
        .parse::<f64>()
        .map_err(|_| format!("'{tok}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{tok}' is not finite"));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// [
///   [0.0,  0.0,     0.0],
///   [30.0, 1.2e-6, -0.4e-6],
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Sample>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let rows: Vec<[f64; 3]> = serde_json::from_str(&text).map_err(|e| {
        AnalysisError::MalformedSample {
            path: path.to_path_buf(),
            line: e.line(),
            reason: e.to_string(),
        }
    })?;

    let samples = samples_from_rows(rows).map_err(|(row, reason)| AnalysisError::MalformedSample {
        path: path.to_path_buf(),
        line: row,
        reason,
    })?;
    Ok(samples)
}

/// Validate decoded rows; an error carries the 1-based row index.
fn samples_from_rows(rows: Vec<[f64; 3]>) -> std::result::Result<Vec<Sample>, (usize, String)> {
    let mut samples = Vec::with_capacity(rows.len());
    for (i, [t, x, y]) in rows.into_iter().enumerate() {
        if [t, x, y].iter().any(|v| !v.is_finite()) {
            return Err((i + 1, "contains a non-finite value".to_string()));
        }
        push_in_order(&mut samples, Sample::new(t, x, y)).map_err(|reason| (i + 1, reason))?;
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn analysis_error(err: &anyhow::Error) -> &AnalysisError {
        err.downcast_ref::<AnalysisError>()
            .expect("expected an AnalysisError")
    }

    #[test]
    fn loads_headerless_comma_separated_rows() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "traj1.txt",
            "0,0.0,0.0\n30, 1.5e-6, -2.0e-6\n\n60,2.0e-6,-1.0e-6\n",
        );

        let traj = load_file(&path).unwrap();
        assert_eq!(traj.label, "traj1");
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.samples()[1], Sample::new(30.0, 1.5e-6, -2.0e-6));
    }

    #[test]
    fn loads_json_triples() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "walk.json", "[[0, 0, 0], [1, 2, 3]]");

        let traj = load_file(&path).unwrap();
        assert_eq!(traj.samples()[1], Sample::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn missing_file_is_named() {
        let dir = tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::MissingInputFile { .. }
        ));
    }

    #[test]
    fn non_numeric_field_reports_line() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "bad.txt", "0,0,0\n1,abc,0\n");

        let err = load_file(&path).unwrap_err();
        match analysis_error(&err) {
            AnalysisError::MalformedSample { line, reason, .. } => {
                assert_eq!(*line, 2);
                assert!(reason.starts_with("x:"), "reason was {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn wrong_column_count_is_malformed() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "bad.csv", "0,0,0\n1,2\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::MalformedSample { line: 2, .. }
        ));
    }

    #[test]
    fn decreasing_times_report_their_line() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "backwards.txt",
            "90,3e-6,0\n60,2e-6,0\n30,1e-6,0\n0,0,0\n",
        );

        let err = load_file(&path).unwrap_err();
        match analysis_error(&err) {
            AnalysisError::MalformedSample { line, reason, .. } => {
                assert_eq!(*line, 2);
                assert!(reason.contains("does not follow"), "reason was {reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn repeated_time_reports_its_line() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "stalled.csv", "0,0,0\n30,1e-6,0\n30,2e-6,0\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::MalformedSample { line: 3, .. }
        ));
    }

    #[test]
    fn json_ordering_error_reports_row() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "walk.json",
            "[[0, 0, 0], [30, 1, 1], [30, 2, 2], [60, 3, 3]]",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::MalformedSample { line: 3, .. }
        ));
    }

    #[test]
    fn non_finite_row_is_reported_by_index() {
        let rows = vec![[0.0, 0.0, 0.0], [30.0, 1.0, 1.0], [60.0, f64::NAN, 0.0]];
        let (row, reason) = samples_from_rows(rows).unwrap_err();
        assert_eq!(row, 3);
        assert!(reason.contains("non-finite"), "reason was {reason}");

        let rows = vec![[0.0, 0.0, 0.0], [30.0, 1.0, f64::INFINITY]];
        assert_eq!(samples_from_rows(rows).unwrap_err().0, 2);
    }

    #[test]
    fn single_row_is_insufficient() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "one.txt", "0,0,0\n");

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            analysis_error(&err),
            AnalysisError::InsufficientSamples { found: 1, .. }
        ));
    }

    #[test]
    fn set_preserves_input_order() {
        let dir = tempdir().unwrap();
        let b = write_file(dir.path(), "b.txt", "0,0,0\n1,1,1\n2,2,2\n");
        let a = write_file(dir.path(), "a.txt", "0,0,0\n1,1,1\n");

        let set = load_set(&[b, a]).unwrap();
        let labels: Vec<&str> = set.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["b", "a"]);
    }
}
