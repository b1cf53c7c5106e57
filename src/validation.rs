//! Input validation for CPU scheduling simulations.
//!
//! The scheduling algorithms assume well-formed input and do not re-check
//! it. These functions let a caller verify preconditions up front. They
//! detect:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Non-positive round-robin quantum or negative context-switch cost
//! - Invalid workload distribution parameters
//!
//! Every problem found is reported, not just the first.

use std::collections::HashSet;

use crate::experiment::ExperimentParameters;
use crate::models::Process;
use crate::scheduler::SimulationConfig;
use crate::workload::WorkloadSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process demands no CPU time.
    NonPositiveBurst,
    /// Round-robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Context-switch cost is negative.
    NegativeContextSwitch,
    /// A workload distribution parameter is out of range.
    InvalidWorkload,
    /// An experiment asks for zero replications.
    NoReplications,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        for e in &errors {
            log::warn!("validation failed: {e}");
        }
        Err(errors)
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. All arrival times are non-negative
/// 3. All burst times are positive
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' arrives at {}", p.id, p.arrival_time),
            ));
        }
        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has burst time {}", p.id, p.burst_time),
            ));
        }
    }

    finish(errors)
}

/// Validates a simulation configuration.
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    finish(config_errors(config))
}

fn config_errors(config: &SimulationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.time_quantum <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum must be positive, got {}", config.time_quantum),
        ));
    }
    if config.context_switch_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeContextSwitch,
            format!(
                "Context switch time must be non-negative, got {}",
                config.context_switch_time
            ),
        ));
    }
    errors
}

/// Validates workload generation parameters.
pub fn validate_workload(spec: &WorkloadSpec) -> ValidationResult {
    finish(workload_errors(spec))
}

fn workload_errors(spec: &WorkloadSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut check = |ok: bool, message: String| {
        if !ok {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWorkload,
                message,
            ));
        }
    };

    check(
        spec.mean_inter_arrival.is_finite() && spec.mean_inter_arrival >= 0.0,
        format!("Mean inter-arrival must be >= 0, got {}", spec.mean_inter_arrival),
    );
    check(
        spec.mean_burst.is_finite() && spec.mean_burst > 0.0,
        format!("Mean burst must be > 0, got {}", spec.mean_burst),
    );
    check(
        spec.burst_std_dev.is_finite() && spec.burst_std_dev >= 0.0,
        format!("Burst std-dev must be >= 0, got {}", spec.burst_std_dev),
    );
    check(
        spec.max_priority >= 1,
        format!("Max priority must be >= 1, got {}", spec.max_priority),
    );
    errors
}

/// Validates a full experiment definition.
pub fn validate_experiment(params: &ExperimentParameters) -> ValidationResult {
    let mut errors = workload_errors(&params.workload);
    errors.extend(config_errors(&params.simulation));
    if params.replications == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoReplications,
            "Experiment needs at least one replication",
        ));
    }
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_processes() {
        let processes = vec![
            Process::new("P1", 5),
            Process::new("P2", 3).with_arrival(2),
        ];
        assert!(validate_processes(&processes).is_ok());
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_process_id() {
        let processes = vec![Process::new("P1", 5), Process::new("P1", 3)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_reports_all_problems() {
        let processes = vec![Process::new("P1", 0).with_arrival(-1)];
        let errors = validate_processes(&processes).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NegativeArrival,
                ValidationErrorKind::NonPositiveBurst
            ]
        );
    }

    #[test]
    fn test_config() {
        assert!(validate_config(&SimulationConfig::default()).is_ok());

        let bad = SimulationConfig::default()
            .with_quantum(0)
            .with_context_switch(-1);
        let errors = validate_config(&bad).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveQuantum);
        assert_eq!(errors[1].kind, ValidationErrorKind::NegativeContextSwitch);
    }

    #[test]
    fn test_workload() {
        let spec = WorkloadSpec::new(10, 5.0, 8.0, 2.0, 10);
        assert!(validate_workload(&spec).is_ok());

        let bad = WorkloadSpec::new(10, -1.0, 0.0, f64::NAN, 0);
        let errors = validate_workload(&bad).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidWorkload));
    }

    #[test]
    fn test_experiment() {
        assert!(validate_experiment(&ExperimentParameters::low_contention()).is_ok());

        let mut params = ExperimentParameters::realistic_overhead();
        params.replications = 0;
        params.simulation.time_quantum = 0;
        let errors = validate_experiment(&params).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::NoReplications));
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveQuantum));
    }

    #[test]
    fn test_error_display() {
        let e = ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: P1");
        assert_eq!(e.to_string(), "DuplicateId: Duplicate process ID: P1");
    }
}
