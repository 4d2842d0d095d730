//! Discontinuity exclusion around revealing points.
//!
//! A revealing point sits at or near a detected discontinuity of the
//! blackbox. Every revealing point anchors an open ball of radius
//! `exclusion_radius`; a candidate inside any ball is treated as violating
//! the revealed-point constraint and is never promoted to incumbent.

use std::sync::Arc;

use super::config::ExclusionConfig;
use crate::point::EvalPoint;

/// Exclusion policy composed into a barrier.
#[derive(Debug, Clone)]
pub struct DiscontinuityExclusion {
    radius: f64,
    revealing: Vec<Arc<EvalPoint>>,
}

impl DiscontinuityExclusion {
    /// Policy with the given radius and no revealing point yet.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            revealing: Vec::new(),
        }
    }

    /// Policy from validated configuration.
    pub fn from_config(config: &ExclusionConfig) -> Self {
        Self::new(config.radius)
    }

    /// Exclusion radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Revealing points registered so far, in registration order
    pub fn revealing_points(&self) -> &[Arc<EvalPoint>] {
        &self.revealing
    }

    /// `dist(point, revealing) < radius`.
    ///
    /// Purely geometric: objective and violation are ignored. A point exactly
    /// on the sphere is admitted.
    pub fn proximity_test(&self, point: &EvalPoint, revealing: &EvalPoint) -> bool {
        point.distance(revealing) < self.radius
    }

    /// First revealing point whose ball contains `point`.
    pub fn excluding_point(&self, point: &EvalPoint) -> Option<&Arc<EvalPoint>> {
        self.revealing
            .iter()
            .find(|r| self.proximity_test(point, r))
    }

    /// `point` lies inside some exclusion ball.
    pub fn is_excluded(&self, point: &EvalPoint) -> bool {
        self.excluding_point(point).is_some()
    }

    /// Register a revealing point. Returns `false` if one already sits at the
    /// same location; the set never shrinks.
    pub(crate) fn reveal(&mut self, point: Arc<EvalPoint>) -> bool {
        if self.revealing.iter().any(|r| r.same_location(&point)) {
            return false;
        }
        self.revealing.push(point);
        true
    }
}
