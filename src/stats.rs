/// Summary statistics over elapsed times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Returns `None` for an empty slice.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = samples
            .iter()
            .map(|s| {
                let diff = s - mean;
                diff * diff
            })
            .sum::<f64>()
            / count as f64;

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Summary {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_summary() {
        assert!(Summary::from_samples(&[]).is_none());
    }

    #[test]
    fn single_sample() {
        let s = Summary::from_samples(&[0.25]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 0.25);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.min, 0.25);
        assert_eq!(s.max, 0.25);
    }

    #[test]
    fn identical_samples_have_zero_deviation() {
        let s = Summary::from_samples(&[0.5; 7]).unwrap();
        assert_eq!(s.mean, 0.5);
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn population_standard_deviation() {
        // Classic example: population stddev of these values is exactly 2.
        let s = Summary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn two_samples() {
        let s = Summary::from_samples(&[1.0, 3.0]).unwrap();
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert!((s.std_dev - 1.0).abs() < 1e-12);
    }
}
