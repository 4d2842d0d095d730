//! Evaluated points and evaluation tags.
//!
//! An [`EvalPoint`] is a coordinate vector plus one [`Evaluation`] per
//! evaluation channel ([`EvalTag`]). Points are immutable once built and are
//! shared between barrier sets through `Arc`.
//!
//! # Example
//!
//! ```
//! use aprender_barrier::point::{ComputeType, EvalPoint, EvalTag, EvalType, Evaluation};
//!
//! let tag = EvalTag::new(EvalType::Blackbox, ComputeType::Standard);
//! let p = EvalPoint::new(vec![1.0, 2.0]).with_eval(tag, Evaluation::new(5.0, 0.0));
//!
//! assert_eq!(p.dimension(), 2);
//! assert!(p.eval(&tag).is_some_and(Evaluation::is_feasible));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Evaluation channel that produced an objective/violation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvalType {
    /// True blackbox evaluation
    #[default]
    Blackbox,
    /// Quadratic or other local model
    Model,
    /// User-provided static surrogate
    Surrogate,
}

impl EvalType {
    /// Get string name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blackbox => "BB",
            Self::Model => "MODEL",
            Self::Surrogate => "SURROGATE",
        }
    }
}

/// How raw constraint outputs are aggregated into a single violation `h`.
///
/// Only outputs `c_j > 0` count as violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComputeType {
    /// `h = Σ max(c_j, 0)²`
    #[default]
    Standard,
    /// `h = Σ max(c_j, 0)`
    L1,
    /// `h = max_j max(c_j, 0)`
    LInf,
}

impl ComputeType {
    /// Get string name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::L1 => "L1",
            Self::LInf => "LINF",
        }
    }

    /// Aggregate raw constraint outputs into a violation value.
    ///
    /// Returns `None` if any output is NaN.
    pub fn aggregate(&self, constraints: &[f64]) -> Option<f64> {
        if constraints.iter().any(|c| c.is_nan()) {
            return None;
        }
        let violated = constraints.iter().map(|&c| c.max(0.0));
        let h = match self {
            Self::Standard => violated.map(|v| v * v).sum(),
            Self::L1 => violated.sum(),
            Self::LInf => violated.fold(0.0, f64::max),
        };
        Some(h)
    }
}

/// Evaluation channel plus constraint aggregation scheme.
///
/// The barrier only compares points under one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EvalTag {
    /// Evaluation channel
    pub eval_type: EvalType,
    /// Constraint aggregation scheme
    pub compute_type: ComputeType,
}

impl EvalTag {
    /// Create a tag
    pub fn new(eval_type: EvalType, compute_type: ComputeType) -> Self {
        Self {
            eval_type,
            compute_type,
        }
    }
}

impl fmt::Display for EvalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.eval_type.as_str(), self.compute_type.as_str())
    }
}

/// Objective and aggregate constraint violation for one channel.
///
/// `None` means undefined (not evaluated, or the evaluation failed).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Objective value `f` (lower is better)
    pub objective: Option<f64>,
    /// Aggregate violation `h >= 0`
    pub violation: Option<f64>,
}

impl Evaluation {
    /// Create a fully defined evaluation
    pub fn new(objective: f64, violation: f64) -> Self {
        Self {
            objective: Some(objective),
            violation: Some(violation),
        }
    }

    /// An evaluation with neither value known
    pub fn undefined() -> Self {
        Self::default()
    }

    /// Build an evaluation from raw constraint outputs `c_j <= 0`.
    pub fn from_constraints(objective: f64, constraints: &[f64], compute_type: ComputeType) -> Self {
        Self {
            objective: Some(objective),
            violation: compute_type.aggregate(constraints),
        }
    }

    /// Objective, if defined and not NaN
    pub fn f(&self) -> Option<f64> {
        self.objective.filter(|f| !f.is_nan())
    }

    /// Violation, if defined, not NaN and non-negative
    pub fn h(&self) -> Option<f64> {
        self.violation.filter(|h| !h.is_nan() && *h >= 0.0)
    }

    /// Both values are usable for comparisons
    pub fn is_defined(&self) -> bool {
        self.f().is_some() && self.h().is_some()
    }

    /// Zero violation
    pub fn is_feasible(&self) -> bool {
        self.h() == Some(0.0)
    }
}

/// An evaluated point: coordinates plus tagged evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalPoint {
    coordinates: Vec<f64>,
    evals: Vec<(EvalTag, Evaluation)>,
}

impl EvalPoint {
    /// Create a point with no evaluation yet
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self {
            coordinates,
            evals: Vec::new(),
        }
    }

    /// Create a point evaluated under the default tag (blackbox, standard).
    pub fn evaluated(coordinates: Vec<f64>, objective: f64, violation: f64) -> Self {
        Self::new(coordinates).with_eval(EvalTag::default(), Evaluation::new(objective, violation))
    }

    /// Attach an evaluation; replaces any previous one under the same tag.
    #[must_use]
    pub fn with_eval(mut self, tag: EvalTag, eval: Evaluation) -> Self {
        match self.evals.iter_mut().find(|(t, _)| *t == tag) {
            Some(slot) => slot.1 = eval,
            None => self.evals.push((tag, eval)),
        }
        self
    }

    /// Coordinates
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    /// Evaluation under `tag`
    pub fn eval(&self, tag: &EvalTag) -> Option<&Evaluation> {
        self.evals.iter().find(|(t, _)| t == tag).map(|(_, e)| e)
    }

    /// Objective under `tag`
    pub fn f(&self, tag: &EvalTag) -> Option<f64> {
        self.eval(tag).and_then(Evaluation::f)
    }

    /// Violation under `tag`
    pub fn h(&self, tag: &EvalTag) -> Option<f64> {
        self.eval(tag).and_then(Evaluation::h)
    }

    /// Tags this point was evaluated under
    pub fn tags(&self) -> impl Iterator<Item = &EvalTag> {
        self.evals.iter().map(|(t, _)| t)
    }

    /// Whether every coordinate is finite
    pub fn has_finite_coordinates(&self) -> bool {
        self.coordinates.iter().all(|x| x.is_finite())
    }

    /// Euclidean distance between coordinate vectors.
    ///
    /// Extra coordinates on the longer point are ignored; callers check
    /// dimensions first.
    pub fn distance(&self, other: &EvalPoint) -> f64 {
        self.coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Same location in the search space
    pub fn same_location(&self, other: &EvalPoint) -> bool {
        self.coordinates == other.coordinates
    }

    pub(crate) fn tag_list(&self) -> String {
        self.tags()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
