//! Replication statistics: sample mean, deviation, and 95% confidence interval.
//!
//! The margin of error uses the Student-t critical value for `n - 1`
//! degrees of freedom, not a fixed constant.
//!
//! # Reference
//! Law (2015), "Simulation Modeling and Analysis", Ch. 4.5; Abramowitz & Stegun 26.7.5

use average::Variance;
use serde::{Deserialize, Serialize};

/// Two-sided 95% t critical values for 1..=30 degrees of freedom.
const T_TABLE_95: [f64; 30] = [
    12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160,
    2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056,
    2.052, 2.048, 2.045, 2.042,
];

/// 97.5th percentile of the standard normal.
const Z_975: f64 = 1.959_963_984_540_054;

/// Two-sided 95% Student-t critical value.
///
/// Tabulated up to 30 degrees of freedom; above that, the Cornish-Fisher
/// expansion of the t quantile around the normal one. Returns `None` for 0.
pub fn t_critical_95(degrees_of_freedom: u64) -> Option<f64> {
    match degrees_of_freedom {
        0 => None,
        1..=30 => Some(T_TABLE_95[(degrees_of_freedom - 1) as usize]),
        df => {
            let z = Z_975;
            let v = df as f64;
            let z3 = z.powi(3);
            let z5 = z.powi(5);
            let z7 = z.powi(7);
            let g1 = (z3 + z) / 4.0;
            let g2 = (5.0 * z5 + 16.0 * z3 + 3.0 * z) / 96.0;
            let g3 = (3.0 * z7 + 19.0 * z5 + 17.0 * z3 - 15.0 * z) / 384.0;
            Some(z + g1 / v + g2 / v.powi(2) + g3 / v.powi(3))
        }
    }
}

/// Summary of one metric across replications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Number of samples.
    pub samples: usize,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Half-width of the 95% confidence interval.
    pub margin_of_error: f64,
}

impl MetricSummary {
    /// Summarizes `values`. Fewer than two samples give zero spread.
    pub fn from_samples(values: &[f64]) -> Self {
        let variance: Variance = values.iter().copied().collect();
        let samples = values.len();
        let mean = if samples == 0 { 0.0 } else { variance.mean() };

        let Some(t) = samples
            .checked_sub(1)
            .and_then(|df| t_critical_95(df as u64))
        else {
            return Self {
                samples,
                mean,
                ..Self::default()
            };
        };

        let std_dev = variance.sample_variance().sqrt();
        Self {
            samples,
            mean,
            std_dev,
            margin_of_error: t * std_dev / (samples as f64).sqrt(),
        }
    }

    /// Lower and upper bound of the 95% confidence interval.
    pub fn confidence_interval(&self) -> (f64, f64) {
        (self.mean - self.margin_of_error, self.mean + self.margin_of_error)
    }
}

impl std::fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} ± {:.2} (95% CI)",
            self.mean, self.margin_of_error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_table() {
        assert_eq!(t_critical_95(0), None);
        assert!((t_critical_95(1).unwrap() - 12.706).abs() < 1e-10);
        assert!((t_critical_95(29).unwrap() - 2.045).abs() < 1e-10);
        assert!((t_critical_95(30).unwrap() - 2.042).abs() < 1e-10);
    }

    #[test]
    fn test_t_expansion() {
        // Published: df=40 → 2.021, df=60 → 2.000, df=99 → 1.984, df=120 → 1.980
        assert!((t_critical_95(40).unwrap() - 2.021).abs() < 1e-3);
        assert!((t_critical_95(60).unwrap() - 2.000).abs() < 1e-3);
        assert!((t_critical_95(99).unwrap() - 1.984).abs() < 1e-3);
        assert!((t_critical_95(120).unwrap() - 1.980).abs() < 1e-3);
        // Monotone toward z.
        assert!(t_critical_95(31).unwrap() < t_critical_95(30).unwrap());
        assert!((t_critical_95(1_000_000).unwrap() - Z_975).abs() < 1e-5);
    }

    #[test]
    fn test_summary() {
        let s = MetricSummary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.samples, 8);
        assert!((s.mean - 5.0).abs() < 1e-10);
        // Σ(x - 5)^2 = 32, / 7
        assert!((s.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-10);
        let expected = 2.365 * s.std_dev / 8f64.sqrt();
        assert!((s.margin_of_error - expected).abs() < 1e-10);

        let (lo, hi) = s.confidence_interval();
        assert!((hi - lo - 2.0 * expected).abs() < 1e-10);
    }

    #[test]
    fn test_summary_degenerate() {
        let one = MetricSummary::from_samples(&[3.5]);
        assert!((one.mean - 3.5).abs() < 1e-10);
        assert_eq!(one.std_dev, 0.0);
        assert_eq!(one.margin_of_error, 0.0);

        let none = MetricSummary::from_samples(&[]);
        assert_eq!(none, MetricSummary::default());
    }

    #[test]
    fn test_display() {
        let s = MetricSummary {
            samples: 2,
            mean: 12.346,
            std_dev: 1.0,
            margin_of_error: 0.5,
        };
        assert_eq!(s.to_string(), "12.35 ± 0.50 (95% CI)");
    }
}
