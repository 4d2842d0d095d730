//! Non-dominated infeasible frontier and order-statistic threshold selection.
//!
//! # Algorithm
//!
//! ```text
//! candidates = { p : 0 < h(p) ≤ hMax }
//! stable sort candidates by (h asc, f asc)
//! best_f = +∞
//! for p in candidates:
//!     if f(p) < best_f:                      keep p, best_f = f(p), best_h = h(p)
//!     elif (f(p), h(p)) == (best_f, best_h): keep p   (exact tie)
//! ```
//!
//! One sort plus one sweep: O(n log n), deterministic for equal keys.

use std::cmp::Ordering;
use std::sync::Arc;

use super::dominance::criteria;
use crate::error::{BarrierError, Result};
use crate::point::{EvalPoint, EvalTag};

/// Violation of the element at 0-indexed rank `k` of an `h`-ascending slice.
///
/// A point without a defined violation reports `+∞`, which never tightens a
/// threshold.
///
/// # Errors
///
/// [`BarrierError::IndexOutOfRange`] when `k >= sorted.len()`. Callers clamp
/// `k` to `len - 1` when fewer candidates exist than the configured rank.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use aprender_barrier::barrier::kth_violation;
/// use aprender_barrier::point::{EvalPoint, EvalTag};
///
/// let sorted: Vec<_> = [0.2, 0.5, 0.9]
///     .iter()
///     .enumerate()
///     .map(|(i, &h)| Arc::new(EvalPoint::evaluated(vec![i as f64], 1.0, h)))
///     .collect();
///
/// let tag = EvalTag::default();
/// assert_eq!(kth_violation(&sorted, 1, &tag).unwrap(), 0.5);
/// assert!(kth_violation(&sorted, 5, &tag).is_err());
/// ```
pub fn kth_violation(sorted: &[Arc<EvalPoint>], k: usize, tag: &EvalTag) -> Result<f64> {
    debug_assert!(
        sorted
            .windows(2)
            .all(|w| w[0].h(tag).unwrap_or(f64::INFINITY) <= w[1].h(tag).unwrap_or(f64::INFINITY)),
        "kth_violation input must be sorted by ascending h"
    );
    let point = sorted
        .get(k)
        .ok_or_else(|| BarrierError::index_out_of_range(k, sorted.len()))?;
    Ok(point.h(tag).unwrap_or(f64::INFINITY))
}

/// Pareto-minimal infeasible points with `h ≤ h_max`.
///
/// Returns the frontier, sorted by ascending `h` then `f`, and its size.
/// Feasible, undefined and above-threshold points are filtered out first.
pub fn non_dominated_infeasible(
    points: &[Arc<EvalPoint>],
    h_max: f64,
    tag: &EvalTag,
) -> (Vec<Arc<EvalPoint>>, usize) {
    let mut candidates: Vec<((f64, f64), &Arc<EvalPoint>)> = points
        .iter()
        .filter_map(|p| criteria(p, tag).map(|c| (c, p)))
        .filter(|((_, h), _)| *h > 0.0 && *h <= h_max)
        .collect();

    candidates.sort_by(|(a, _), (b, _)| by_violation_then_objective(*a, *b));

    let mut frontier = Vec::with_capacity(candidates.len());
    let mut best: Option<(f64, f64)> = None;
    for ((f, h), p) in candidates {
        let keep = match best {
            None => true,
            Some((best_f, best_h)) => f < best_f || (f == best_f && h == best_h),
        };
        if keep {
            if best.map_or(true, |(best_f, _)| f < best_f) {
                best = Some((f, h));
            }
            frontier.push(Arc::clone(p));
        }
    }

    let count = frontier.len();
    (frontier, count)
}

/// Sort key shared by the sweep and threshold selection.
pub(crate) fn by_violation_then_objective(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.total_cmp(&b.0))
}
