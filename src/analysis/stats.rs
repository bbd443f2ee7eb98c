/// Mean and standard error of the mean of a group of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanSem {
    pub mean: f64,
    pub sem: f64,
    pub count: usize,
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Mean together with `std / sqrt(n)`. `None` for an empty slice.
pub fn mean_sem(values: &[f64]) -> Option<MeanSem> {
    if values.is_empty() {
        return None;
    }
    let n = values.len();
    Some(MeanSem {
        mean: mean(values),
        sem: std_dev(values) / (n as f64).sqrt(),
        count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_of_known_values() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), 5.0);
        assert_eq!(std_dev(&v), 2.0);
        let ms = mean_sem(&v).unwrap();
        assert!((ms.sem - 2.0 / 8f64.sqrt()).abs() < 1e-12);
        assert_eq!(ms.count, 8);
    }

    #[test]
    fn single_value_has_zero_sem() {
        let ms = mean_sem(&[3.5]).unwrap();
        assert_eq!(ms.mean, 3.5);
        assert_eq!(ms.sem, 0.0);
    }

    #[test]
    fn empty_group_has_no_summary() {
        assert!(mean_sem(&[]).is_none());
        assert!(mean(&[]).is_nan());
    }
}
