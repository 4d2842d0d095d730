//! Progressive barrier for constrained derivative-free optimization.
//!
//! The barrier keeps the best feasible points found so far, a Pareto frontier
//! of infeasible points in `(f, h)` space, and a threshold `hMax` above which
//! infeasible points are ignored. Optionally, a [`DiscontinuityExclusion`]
//! policy screens out points close to known discontinuities before they can
//! be promoted.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use aprender_barrier::barrier::{BarrierConfig, ProgressiveBarrier};
//! use aprender_barrier::point::EvalPoint;
//!
//! let mut barrier = ProgressiveBarrier::new(BarrierConfig::new(2).with_initial_h_max(3.0)).unwrap();
//!
//! let batch = vec![
//!     Arc::new(EvalPoint::evaluated(vec![0.0, 0.0], 2.0, 1.0)),
//!     Arc::new(EvalPoint::evaluated(vec![1.0, 0.0], 1.0, 2.0)),
//! ];
//! let outcome = barrier.update(&batch, false, false).unwrap();
//!
//! assert!(outcome.improved);
//! assert_eq!(barrier.non_dominated_infeasible().1, 2);
//! assert!(barrier.best_feasible().is_none());
//! ```
//!
//! # References
//!
//! - Audet & Dennis (2009): "A Progressive Barrier for Derivative-Free
//!   Nonlinear Programming"
//! - Bouchet, Le Digabel & Audet (2024): "DiscoMads: Discontinuity
//!   detection in blackbox optimization"

mod config;
pub mod dominance;
mod exclusion;
mod frontier;
mod progressive;

pub use config::{BarrierConfig, ExclusionConfig, DEFAULT_EXCLUSION_RADIUS, DEFAULT_H_MAX_RANK};
pub use dominance::Dominance;
pub use exclusion::DiscontinuityExclusion;
pub use frontier::{kth_violation, non_dominated_infeasible};
pub use progressive::ProgressiveBarrier;

use crate::error::BarrierError;

/// Where a point of an update batch ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Feasible incumbent (best objective, or kept in exhaustive mode)
    Feasible,
    /// Feasible but worse than the best feasible incumbent
    FeasibleDominated,
    /// Member of the infeasible frontier
    InfeasibleIncumbent,
    /// Infeasible and dominated by an incumbent
    InfeasibleDominated,
    /// Infeasible with `h > hMax`
    AboveThreshold,
    /// Inside the exclusion ball of a revealing point
    ExcludedByProximity,
    /// Objective or violation undefined, or a coordinate is not finite
    Unevaluated,
    /// Structurally invalid for this barrier (see [`UpdateOutcome::rejected`])
    Rejected,
}

/// Quality of an update, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SuccessType {
    /// Nothing changed
    #[default]
    Unsuccessful,
    /// The infeasible frontier changed without dominating a prior incumbent
    PartialSuccess,
    /// Better feasible point, or a prior infeasible incumbent was dominated
    FullSuccess,
}

/// A batch point that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Position in the batch
    pub index: usize,
    /// Reason
    pub error: BarrierError,
}

/// Result of [`ProgressiveBarrier::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateOutcome {
    /// Best feasible incumbent or infeasible frontier changed
    pub improved: bool,
    /// Success level of the merge
    pub success: SuccessType,
    /// `hMax` was lowered by this call
    pub h_max_changed: bool,
    /// One entry per batch point, in batch order
    pub classifications: Vec<Classification>,
    /// Points rejected for structural reasons
    pub rejected: Vec<Rejection>,
}

impl UpdateOutcome {
    /// Number of batch points with the given classification
    #[must_use]
    pub fn count(&self, class: Classification) -> usize {
        self.classifications.iter().filter(|c| **c == class).count()
    }
}


#[cfg(test)]
#[path = "tests_barrier_contract.rs"]
mod tests_barrier_contract;
