//! Replicated comparative experiments.
//!
//! Runs every scheduling policy over many independently generated
//! workloads and summarizes each aggregate metric with a mean and a 95%
//! confidence interval. Results can be exported as CSV for external analysis.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::experiment::{ExperimentParameters, ExperimentRunner, Metric};
//! use u_cpusched::scheduler::AlgorithmKind;
//!
//! let mut params = ExperimentParameters::high_contention();
//! params.replications = 3;
//! params.workload.num_jobs = 20;
//!
//! let report = ExperimentRunner::new(params).with_seed(1).run().unwrap();
//! let fcfs = report.summary(AlgorithmKind::Fcfs, Metric::AvgWaitingTime);
//! assert_eq!(fcfs.samples, 3);
//! ```

mod stats;

pub use stats::{t_critical_95, MetricSummary};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::scheduler::{AlgorithmKind, SimulationConfig, SimulationResult};
use crate::validation::{validate_experiment, ValidationError};
use crate::workload::{WorkloadGenerator, WorkloadSpec};

/// Aggregate metric tracked per replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Mean waiting time.
    AvgWaitingTime,
    /// Mean turnaround time.
    AvgTurnaroundTime,
    /// CPU utilization in percent.
    CpuUtilization,
    /// Processes per time unit.
    Throughput,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 4] = [
        Metric::AvgWaitingTime,
        Metric::AvgTurnaroundTime,
        Metric::CpuUtilization,
        Metric::Throughput,
    ];

    /// Column value used in CSV export.
    pub fn csv_name(self) -> &'static str {
        match self {
            Self::AvgWaitingTime => "AvgWaitingTime",
            Self::AvgTurnaroundTime => "AvgTurnaroundTime",
            Self::CpuUtilization => "CPUUtilization",
            Self::Throughput => "Throughput",
        }
    }

    /// Human-readable heading.
    pub fn label(self) -> &'static str {
        match self {
            Self::AvgWaitingTime => "Average Waiting Time",
            Self::AvgTurnaroundTime => "Average Turnaround Time",
            Self::CpuUtilization => "CPU Utilization (%)",
            Self::Throughput => "Throughput (jobs per time unit)",
        }
    }

    /// Extracts this metric from a run result.
    pub fn value(self, result: &SimulationResult) -> f64 {
        match self {
            Self::AvgWaitingTime => result.avg_waiting_time,
            Self::AvgTurnaroundTime => result.avg_turnaround_time,
            Self::CpuUtilization => result.cpu_utilization,
            Self::Throughput => result.throughput,
        }
    }
}

/// Experiment definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentParameters {
    /// Workload distribution for each replication.
    pub workload: WorkloadSpec,
    /// Quantum and context-switch cost.
    pub simulation: SimulationConfig,
    /// Number of independent workloads.
    pub replications: usize,
}

impl ExperimentParameters {
    /// Creates experiment parameters.
    pub fn new(workload: WorkloadSpec, simulation: SimulationConfig, replications: usize) -> Self {
        Self {
            workload,
            simulation,
            replications,
        }
    }

    /// Low contention baseline: inter-arrival 10 > mean burst 8, no switch cost.
    pub fn low_contention() -> Self {
        Self::new(
            WorkloadSpec::new(100, 10.0, 8.0, 2.0, 10),
            SimulationConfig::new().with_quantum(5).with_context_switch(0),
            100,
        )
    }

    /// Saturated load: inter-arrival 2 ≪ mean burst 8, no switch cost.
    pub fn high_contention() -> Self {
        Self::new(
            WorkloadSpec::new(100, 2.0, 8.0, 2.0, 10),
            SimulationConfig::new().with_quantum(5).with_context_switch(0),
            100,
        )
    }

    /// Heavy but unsaturated load with a 1-tick context-switch cost.
    pub fn realistic_overhead() -> Self {
        Self::new(
            WorkloadSpec::new(100, 5.0, 8.0, 2.0, 10),
            SimulationConfig::new().with_quantum(5).with_context_switch(1),
            100,
        )
    }
}

/// Runs replicated experiments.
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    params: ExperimentParameters,
    seed: Option<u64>,
}

impl ExperimentRunner {
    /// Creates a runner; workloads are seeded from the OS unless
    /// [`with_seed`](Self::with_seed) is used.
    pub fn new(params: ExperimentParameters) -> Self {
        Self { params, seed: None }
    }

    /// Makes the experiment reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Experiment parameters.
    pub fn parameters(&self) -> &ExperimentParameters {
        &self.params
    }

    /// Runs all replications.
    ///
    /// Each replication draws a fresh workload and runs every policy on it.
    /// Returns the validation errors if the parameters are invalid.
    pub fn run(&self) -> Result<ExperimentReport, Vec<ValidationError>> {
        validate_experiment(&self.params)?;

        let mut generator = match self.seed {
            Some(seed) => WorkloadGenerator::new(seed),
            None => WorkloadGenerator::from_os_rng(),
        };

        log::info!(
            "starting experiment: {} replications of {} jobs",
            self.params.replications,
            self.params.workload.num_jobs
        );

        let mut report = ExperimentReport::new(self.params.replications);
        for replication in 0..self.params.replications {
            let workload = generator.generate(&self.params.workload);
            for kind in AlgorithmKind::ALL {
                let outcome = kind.run(&workload, &self.params.simulation);
                report.record(kind, &outcome.result);
            }
            log::debug!("replication {replication} done");
        }

        log::info!("experiment finished");
        Ok(report)
    }
}

/// Per-replication results of an experiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    replications: usize,
    samples: BTreeMap<AlgorithmKind, BTreeMap<Metric, Vec<f64>>>,
}

impl ExperimentReport {
    fn new(replications: usize) -> Self {
        Self {
            replications,
            samples: BTreeMap::new(),
        }
    }

    fn record(&mut self, kind: AlgorithmKind, result: &SimulationResult) {
        let per_metric = self.samples.entry(kind).or_default();
        for metric in Metric::ALL {
            per_metric
                .entry(metric)
                .or_default()
                .push(metric.value(result));
        }
    }

    /// Number of replications run.
    pub fn replications(&self) -> usize {
        self.replications
    }

    /// Raw samples, one per replication.
    pub fn samples(&self, kind: AlgorithmKind, metric: Metric) -> &[f64] {
        self.samples
            .get(&kind)
            .and_then(|m| m.get(&metric))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mean and 95% confidence interval of one metric.
    pub fn summary(&self, kind: AlgorithmKind, metric: Metric) -> MetricSummary {
        MetricSummary::from_samples(self.samples(kind, metric))
    }

    /// Writes `Replication,Algorithm,Metric,Value` rows, two decimals.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Replication,Algorithm,Metric,Value")?;
        for replication in 0..self.replications {
            for kind in AlgorithmKind::ALL {
                for metric in Metric::ALL {
                    if let Some(value) = self.samples(kind, metric).get(replication) {
                        writeln!(
                            writer,
                            "{},{},{},{:.2}",
                            replication,
                            kind.label(),
                            metric.csv_name(),
                            value
                        )?;
                    }
                }
            }
        }
        writer.flush()
    }
}
