//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules sequentially: the first rule decides, later
//! rules only break its ties, and a final [`TieBreaker`] settles the rest.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchRule;
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave tied processes in admission order (stable).
    #[default]
    Admission,
    /// Deterministic by process ID (lexicographic).
    ById,
}

/// A composable rule engine for process ordering.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, RuleEngine};
///
/// let sjf = RuleEngine::new()
///     .with_rule(rules::ArrivalOrder)
///     .with_tie_breaker(rules::ShortestBurst);
/// assert_eq!(sjf.rule_names(), vec!["FIFO", "SJF"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine (every process compares equal).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Admission,
        }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    ///
    /// Rules are evaluated in insertion order, so this is equivalent to
    /// [`with_rule`](Self::with_rule); the name documents intent.
    pub fn with_tie_breaker<R: DispatchRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Compares two processes through the rule chain.
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            let ord = rule.compare(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::Admission => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }

    /// Stable sort, dispatch-first at the front.
    pub fn sort(&self, processes: &mut [Process]) {
        processes.sort_by(|a, b| self.compare(a, b));
    }

    /// Index of the process that would be dispatched first.
    ///
    /// Ties resolve to the lowest index.
    pub fn select_best(&self, processes: &[Process]) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| self.compare(a, b).then(ia.cmp(ib)))
            .map(|(i, _)| i)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
