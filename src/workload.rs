//! Synthetic workload generation.
//!
//! Produces process sets from statistical distributions:
//!
//! | Attribute | Distribution |
//! |-----------|--------------|
//! | Inter-arrival | Exponential, mean `mean_inter_arrival` (truncated, ≥ 0) |
//! | Burst | Normal, `mean_burst ± burst_std_dev` (truncated, ≥ 1) |
//! | Priority | Uniform on `1..=max_priority` |
//!
//! Arrival times are cumulative, starting at t=0. IDs are `P1..Pn`.
//!
//! # Reference
//! Law (2015), "Simulation Modeling and Analysis", Ch. 8: Generating Random Variates

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Process, Time};

/// Workload distribution parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of processes to generate.
    pub num_jobs: usize,
    /// Mean of the exponential inter-arrival time.
    pub mean_inter_arrival: f64,
    /// Mean of the normal burst time.
    pub mean_burst: f64,
    /// Standard deviation of the burst time.
    pub burst_std_dev: f64,
    /// Priorities are drawn from `1..=max_priority`.
    pub max_priority: i32,
}

impl WorkloadSpec {
    /// Creates a workload specification.
    pub fn new(
        num_jobs: usize,
        mean_inter_arrival: f64,
        mean_burst: f64,
        burst_std_dev: f64,
        max_priority: i32,
    ) -> Self {
        Self {
            num_jobs,
            mean_inter_arrival,
            mean_burst,
            burst_std_dev,
            max_priority,
        }
    }
}

/// Random process-set generator.
///
/// # Example
/// ```
/// use u_cpusched::workload::{WorkloadGenerator, WorkloadSpec};
///
/// let spec = WorkloadSpec::new(20, 5.0, 8.0, 2.0, 10);
/// let a = WorkloadGenerator::new(7).generate(&spec);
/// let b = WorkloadGenerator::new(7).generate(&spec);
/// assert_eq!(a, b);
/// assert_eq!(a[0].id, "P1");
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Creates a generator with a fixed seed (reproducible).
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Generates `spec.num_jobs` processes.
    pub fn generate(&mut self, spec: &WorkloadSpec) -> Vec<Process> {
        let max_priority = spec.max_priority.max(1);
        let mut arrival: Time = 0;

        (1..=spec.num_jobs)
            .map(|i| {
                arrival += self.inter_arrival(spec.mean_inter_arrival);
                let burst = self.burst(spec.mean_burst, spec.burst_std_dev);
                let priority = self.rng.random_range(1..=max_priority);
                Process::new(format!("P{i}"), burst)
                    .with_arrival(arrival)
                    .with_priority(priority)
            })
            .collect()
    }

    /// Exponential variate by inversion: `-mean * ln(1 - u)`.
    fn inter_arrival(&mut self, mean: f64) -> Time {
        let u: f64 = self.rng.random();
        let sample = -mean * (1.0 - u).ln();
        (sample as Time).max(0)
    }

    /// Normal variate (Box-Muller), at least 1.
    fn burst(&mut self, mean: f64, std_dev: f64) -> Time {
        let z = self.standard_normal();
        ((z * std_dev + mean) as Time).max(1)
    }

    fn standard_normal(&mut self) -> f64 {
        // 1 - u keeps the log argument in (0, 1].
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}
