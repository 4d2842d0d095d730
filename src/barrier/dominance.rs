//! Dominance order between evaluated points.
//!
//! Feasible points compare on the objective alone. Infeasible points compare
//! on the pair `(f, h)`, both minimized:
//!
//! ```text
//! A ≺ B  ⇔  f(A) ≤ f(B) ∧ h(A) ≤ h(B) ∧ (f(A) < f(B) ∨ h(A) < h(B))
//! ```
//!
//! Exact ties dominate in neither direction.

use crate::point::{EvalPoint, EvalTag};

/// Outcome of comparing two infeasible points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right
    Dominates,
    /// Right dominates left
    Dominated,
    /// Same `(f, h)`
    Equal,
    /// Neither is at least as good in both criteria
    Incomparable,
}

/// Strict objective improvement for feasible points.
#[inline]
pub fn feasible_better(a_f: f64, b_f: f64) -> bool {
    a_f < b_f
}

/// `a = (f, h)` dominates `b = (f, h)`.
#[inline]
pub fn dominates(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.0 && a.1 <= b.1 && (a.0 < b.0 || a.1 < b.1)
}

/// Full comparison of two `(f, h)` pairs.
pub fn compare(a: (f64, f64), b: (f64, f64)) -> Dominance {
    if a == b {
        Dominance::Equal
    } else if dominates(a, b) {
        Dominance::Dominates
    } else if dominates(b, a) {
        Dominance::Dominated
    } else {
        Dominance::Incomparable
    }
}

/// `(f, h)` of a point under `tag`, if both are defined.
pub fn criteria(point: &EvalPoint, tag: &EvalTag) -> Option<(f64, f64)> {
    let eval = point.eval(tag)?;
    Some((eval.f()?, eval.h()?))
}

/// Point-level dominance; undefined values never dominate nor are dominated.
pub fn point_dominates(a: &EvalPoint, b: &EvalPoint, tag: &EvalTag) -> bool {
    match (criteria(a, tag), criteria(b, tag)) {
        (Some(ca), Some(cb)) => dominates(ca, cb),
        _ => false,
    }
}
