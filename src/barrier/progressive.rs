//! Progressive barrier state and update protocol.

use std::sync::Arc;

use log::{debug, info, trace, warn};

use super::config::BarrierConfig;
use super::dominance::{criteria, dominates, feasible_better, point_dominates};
use super::exclusion::DiscontinuityExclusion;
use super::frontier::{kth_violation, non_dominated_infeasible};
use super::{Classification, Rejection, SuccessType, UpdateOutcome};
use crate::error::{BarrierError, Result};
use crate::point::{EvalPoint, EvalTag};

/// Progressive barrier with optional discontinuity exclusion.
///
/// # Algorithm
///
/// ```text
/// for p in batch:
///     if p near a revealing point:     excluded
///     elif h(p) == 0:                  merge into feasible by f
///     elif h(p) ≤ hMax:                merge into infeasible frontier by (f, h) dominance
/// if tighten and frontier ≠ ∅:
///     hMax ← min(hMax, h(frontier[min(k, len-1)]))
///     drop incumbents with h > hMax
/// ```
///
/// `hMax` never increases. The best feasible objective never increases.
///
/// Cloning copies memberships and scalar state; point records are shared
/// through `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct ProgressiveBarrier {
    dimension: usize,
    tag: EvalTag,
    h_max: f64,
    h_max_rank: usize,
    feasible: Vec<Arc<EvalPoint>>,
    infeasible: Vec<Arc<EvalPoint>>,
    exclusion: Option<DiscontinuityExclusion>,
}

impl ProgressiveBarrier {
    /// Creates an empty barrier.
    ///
    /// # Errors
    ///
    /// [`BarrierError::InvalidHyperparameter`] if the configuration is invalid.
    pub fn new(config: BarrierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dimension: config.dimension,
            tag: config.eval_tag,
            h_max: config.initial_h_max(),
            h_max_rank: config.h_max_rank,
            feasible: Vec::new(),
            infeasible: Vec::new(),
            exclusion: config.exclusion.as_ref().map(DiscontinuityExclusion::from_config),
        })
    }

    /// Creates a barrier seeded from previously evaluated points.
    ///
    /// Seed points evaluated under another tag are skipped. The threshold is
    /// left at its configured value.
    pub fn from_cache(config: BarrierConfig, seed: &[Arc<EvalPoint>]) -> Result<Self> {
        let mut barrier = Self::new(config)?;
        let outcome = barrier.update(seed, false, false)?;
        debug!(
            "Barrier initialized from cache: {} seed points, {} feasible, {} infeasible",
            seed.len(),
            barrier.feasible.len(),
            barrier.infeasible.len()
        );
        if !outcome.rejected.is_empty() {
            debug!("{} cache points skipped (tag mismatch)", outcome.rejected.len());
        }
        Ok(barrier)
    }

    /// Adds initial revealing points; requires exclusion to be configured.
    pub fn with_revealing_points(mut self, points: &[Arc<EvalPoint>]) -> Result<Self> {
        for p in points {
            self.register_revealing_point(Arc::clone(p))?;
        }
        Ok(self)
    }

    /// Coordinate dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tag points are compared under
    pub fn eval_tag(&self) -> EvalTag {
        self.tag
    }

    /// Current threshold
    pub fn h_max(&self) -> f64 {
        self.h_max
    }

    /// Frontier rank used to tighten `hMax`
    pub fn h_max_rank(&self) -> usize {
        self.h_max_rank
    }

    /// Best feasible incumbent, if any feasible point has been seen
    pub fn best_feasible(&self) -> Option<&Arc<EvalPoint>> {
        self.feasible.first()
    }

    /// Feasible incumbents, ascending objective
    pub fn feasible(&self) -> &[Arc<EvalPoint>] {
        &self.feasible
    }

    /// Infeasible incumbents, in insertion order
    pub fn infeasible(&self) -> &[Arc<EvalPoint>] {
        &self.infeasible
    }

    /// Non-dominated infeasible incumbents with `h ≤ hMax`, and their count.
    pub fn non_dominated_infeasible(&self) -> (Vec<Arc<EvalPoint>>, usize) {
        non_dominated_infeasible(&self.infeasible, self.h_max, &self.tag)
    }

    /// Frontier point with the smallest violation (ties: smallest objective).
    pub fn best_infeasible(&self) -> Option<Arc<EvalPoint>> {
        self.non_dominated_infeasible().0.into_iter().next()
    }

    /// Exclusion policy, if enabled
    pub fn exclusion(&self) -> Option<&DiscontinuityExclusion> {
        self.exclusion.as_ref()
    }

    /// Forget all feasible incumbents.
    pub fn clear_feasible(&mut self) {
        self.feasible.clear();
    }

    /// Forget all infeasible incumbents.
    pub fn clear_infeasible(&mut self) {
        self.infeasible.clear();
    }

    /// Lowers `hMax` and drops incumbents above it.
    ///
    /// Returns whether the infeasible set changed.
    ///
    /// # Errors
    ///
    /// [`BarrierError::InvalidHMax`] if `h_max` is NaN, negative, or above the
    /// current threshold.
    pub fn set_h_max(&mut self, h_max: f64) -> Result<bool> {
        if h_max.is_nan() || h_max < 0.0 || h_max > self.h_max {
            return Err(BarrierError::InvalidHMax {
                requested: h_max,
                current: self.h_max,
            });
        }
        self.h_max = h_max;
        Ok(self.drop_above_threshold() > 0)
    }

    /// Registers a revealing point and evicts incumbents inside its ball.
    ///
    /// Returns whether any incumbent was evicted.
    ///
    /// # Errors
    ///
    /// [`BarrierError::Config`] if exclusion is not enabled,
    /// [`BarrierError::DimensionMismatch`] for a point of the wrong dimension,
    /// [`BarrierError::NonFiniteCoordinates`] for a NaN or infinite coordinate.
    pub fn register_revealing_point(&mut self, point: Arc<EvalPoint>) -> Result<bool> {
        if point.dimension() != self.dimension {
            return Err(BarrierError::dimension_mismatch(
                self.dimension,
                point.dimension(),
            ));
        }
        if !point.has_finite_coordinates() {
            return Err(BarrierError::NonFiniteCoordinates {
                coordinates: point.coordinates().to_vec(),
            });
        }
        let Some(exclusion) = self.exclusion.as_mut() else {
            return Err(BarrierError::Config(
                "discontinuity exclusion is not enabled".to_string(),
            ));
        };
        if !exclusion.reveal(Arc::clone(&point)) {
            return Ok(false);
        }
        info!(
            "Revealing point registered at {:?} ({} total)",
            point.coordinates(),
            exclusion.revealing_points().len()
        );

        let exclusion = &*exclusion;
        let before = self.feasible.len() + self.infeasible.len();
        self.feasible.retain(|q| !exclusion.proximity_test(q, &point));
        self.infeasible.retain(|q| !exclusion.proximity_test(q, &point));
        let evicted = before - self.feasible.len() - self.infeasible.len();
        if evicted > 0 {
            debug!("{evicted} incumbents evicted by revealing point");
        }
        Ok(evicted > 0)
    }

    /// Update with default flags: prune dominated points, keep `hMax`.
    pub fn update_default(&mut self, points: &[Arc<EvalPoint>]) -> Result<UpdateOutcome> {
        self.update(points, false, false)
    }

    /// Folds a batch of evaluated points into the barrier.
    ///
    /// # Arguments
    ///
    /// * `points` - Evaluated points, in the barrier's dimension
    /// * `keep_all_points` - Keep dominated and non-best points as incumbents
    /// * `update_infeasible_incumbent_and_h_max` - Tighten `hMax` afterwards
    ///
    /// # Errors
    ///
    /// [`BarrierError::DimensionMismatch`] if any point has the wrong
    /// dimension; the barrier is left unchanged. Points missing the barrier's
    /// evaluation tag are reported in [`UpdateOutcome::rejected`] instead;
    /// points with non-finite coordinates are classified unevaluated.
    pub fn update(
        &mut self,
        points: &[Arc<EvalPoint>],
        keep_all_points: bool,
        update_infeasible_incumbent_and_h_max: bool,
    ) -> Result<UpdateOutcome> {
        if let Some(bad) = points.iter().find(|p| p.dimension() != self.dimension) {
            return Err(BarrierError::dimension_mismatch(
                self.dimension,
                bad.dimension(),
            ));
        }

        let prev_best = self.best_feasible().cloned();
        let (prev_frontier, _) = self.non_dominated_infeasible();
        let mut outcome = UpdateOutcome {
            classifications: Vec::with_capacity(points.len()),
            ..UpdateOutcome::default()
        };

        for (index, point) in points.iter().enumerate() {
            self.merge_point(index, point, keep_all_points, &mut outcome.rejected);
        }

        if update_infeasible_incumbent_and_h_max && !self.infeasible.is_empty() {
            outcome.h_max_changed = self.tighten_h_max()?;
        }

        for point in points {
            outcome.classifications.push(self.classify(point));
        }
        for rejection in &outcome.rejected {
            outcome.classifications[rejection.index] = Classification::Rejected;
        }

        let feasible_improved = match (&prev_best, self.best_feasible()) {
            (None, Some(_)) => true,
            (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
            _ => false,
        };
        let (frontier, _) = self.non_dominated_infeasible();
        let frontier_changed = !same_members(&prev_frontier, &frontier);
        let dominated_prior = frontier
            .iter()
            .filter(|p| !prev_frontier.iter().any(|q| Arc::ptr_eq(p, q)))
            .any(|p| {
                prev_frontier
                    .iter()
                    .any(|q| point_dominates(p, q, &self.tag))
            });

        outcome.improved = feasible_improved || frontier_changed;
        outcome.success = if feasible_improved || dominated_prior {
            SuccessType::FullSuccess
        } else if frontier_changed {
            SuccessType::PartialSuccess
        } else {
            SuccessType::Unsuccessful
        };

        debug!(
            "Barrier update: {} points, improved={}, success={:?}, feasible={}, infeasible={}, hMax={}",
            points.len(),
            outcome.improved,
            outcome.success,
            self.feasible.len(),
            self.infeasible.len(),
            self.h_max
        );
        Ok(outcome)
    }

    fn merge_point(
        &mut self,
        index: usize,
        point: &Arc<EvalPoint>,
        keep_all: bool,
        rejected: &mut Vec<Rejection>,
    ) {
        if point.eval(&self.tag).is_none() {
            let error = BarrierError::InvalidEvaluationTag {
                expected: self.tag,
                found: point.tag_list(),
            };
            warn!("Point {index} rejected: {error}");
            rejected.push(Rejection { index, error });
            return;
        }
        if !point.has_finite_coordinates() {
            trace!("Point {index} skipped: non-finite coordinates");
            return;
        }
        let Some((f, h)) = criteria(point, &self.tag) else {
            return;
        };

        if let Some(revealing) = self
            .exclusion
            .as_ref()
            .and_then(|ex| ex.excluding_point(point))
        {
            trace!(
                "Point {index} excluded: within radius of revealing point {:?}",
                revealing.coordinates()
            );
            return;
        }

        if h == 0.0 {
            self.insert_feasible(point, f, keep_all);
        } else if h.is_finite() && h <= self.h_max {
            self.insert_infeasible(point, f, h, keep_all);
        } else {
            trace!("Point {index} above threshold: h={h} > hMax={}", self.h_max);
        }
    }

    fn insert_feasible(&mut self, point: &Arc<EvalPoint>, f: f64, keep_all: bool) {
        if self.feasible.iter().any(|q| q.same_location(point)) {
            return;
        }
        let tag = self.tag;
        let objective = |q: &Arc<EvalPoint>| q.f(&tag).unwrap_or(f64::INFINITY);

        let admit = match self.feasible.first().map(objective) {
            Some(best) if feasible_better(f, best) && !keep_all => {
                self.feasible.clear();
                true
            }
            Some(best) => keep_all || f <= best,
            None => true,
        };
        if admit {
            // Ties land after equal objectives, ahead of worse keep-all leftovers.
            let pos = self.feasible.partition_point(|q| objective(q) <= f);
            self.feasible.insert(pos, Arc::clone(point));
        }
    }

    fn insert_infeasible(
        &mut self,
        point: &Arc<EvalPoint>,
        f: f64,
        h: f64,
        keep_all: bool,
    ) {
        if self.infeasible.iter().any(|q| q.same_location(point)) {
            return;
        }
        let tag = self.tag;
        let incoming = (f, h);

        if keep_all {
            self.infeasible.push(Arc::clone(point));
            return;
        }
        let is_dominated = self
            .infeasible
            .iter()
            .filter_map(|q| criteria(q, &tag))
            .any(|c| dominates(c, incoming));
        if is_dominated {
            return;
        }

        self.infeasible
            .retain(|q| !criteria(q, &tag).is_some_and(|c| dominates(incoming, c)));
        self.infeasible.push(Arc::clone(point));
    }

    /// `hMax ← min(hMax, h of rank-k frontier point)`; returns whether it moved.
    fn tighten_h_max(&mut self) -> Result<bool> {
        let (frontier, count) = self.non_dominated_infeasible();
        if count == 0 {
            return Ok(false);
        }
        let k = self.h_max_rank.min(count - 1);
        let candidate = kth_violation(&frontier, k, &self.tag)?;
        if candidate >= self.h_max {
            return Ok(false);
        }

        info!("hMax tightened: {} -> {candidate} (rank {k} of {count})", self.h_max);
        self.h_max = candidate;
        let dropped = self.drop_above_threshold();
        if dropped > 0 {
            debug!("{dropped} infeasible incumbents above new hMax dropped");
        }
        Ok(true)
    }

    fn drop_above_threshold(&mut self) -> usize {
        let tag = self.tag;
        let h_max = self.h_max;
        let before = self.infeasible.len();
        self.infeasible
            .retain(|q| q.h(&tag).is_some_and(|h| h <= h_max));
        before - self.infeasible.len()
    }

    fn classify(&self, point: &EvalPoint) -> Classification {
        let Some((_, h)) = criteria(point, &self.tag) else {
            return Classification::Unevaluated;
        };
        if !point.has_finite_coordinates() {
            return Classification::Unevaluated;
        }
        if self
            .exclusion
            .as_ref()
            .is_some_and(|ex| ex.is_excluded(point))
        {
            return Classification::ExcludedByProximity;
        }
        if h == 0.0 {
            if self.feasible.iter().any(|q| q.same_location(point)) {
                Classification::Feasible
            } else {
                Classification::FeasibleDominated
            }
        } else if !h.is_finite() || h > self.h_max {
            Classification::AboveThreshold
        } else if self.infeasible.iter().any(|q| q.same_location(point)) {
            Classification::InfeasibleIncumbent
        } else {
            Classification::InfeasibleDominated
        }
    }
}

fn same_members(a: &[Arc<EvalPoint>], b: &[Arc<EvalPoint>]) -> bool {
    a.len() == b.len() && a.iter().all(|p| b.iter().any(|q| Arc::ptr_eq(p, q)))
}
