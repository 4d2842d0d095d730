//! Barrier configuration.
//!
//! Everything here is fixed at construction. JSON is the interchange format
//! for search engines that load the barrier settings alongside their own.

use serde::{Deserialize, Serialize};

use crate::error::{BarrierError, Result};
use crate::point::EvalTag;

/// Default rank of the point whose violation becomes the new `hMax`.
pub const DEFAULT_H_MAX_RANK: usize = 1;

/// Default exclusion radius around revealing points.
pub const DEFAULT_EXCLUSION_RADIUS: f64 = 1.0;

/// Discontinuity exclusion settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Points strictly closer than this to a revealing point are excluded.
    /// Default: 1.0
    pub radius: f64,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_EXCLUSION_RADIUS,
        }
    }
}

impl ExclusionConfig {
    /// Exclusion with the given radius
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Validate parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(BarrierError::invalid_hyperparameter(
                "exclusion.radius",
                self.radius,
                "finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Runtime configuration for a [`ProgressiveBarrier`](super::ProgressiveBarrier).
///
/// # Example
///
/// ```
/// use aprender_barrier::barrier::BarrierConfig;
///
/// let config = BarrierConfig::new(2)
///     .with_initial_h_max(10.0)
///     .with_exclusion_radius(0.5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.initial_h_max(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierConfig {
    /// Coordinate dimension shared by every point.
    pub dimension: usize,

    /// Evaluation channel and aggregation scheme to compare under.
    pub eval_tag: EvalTag,

    /// Initial threshold. `None` means unbounded.
    pub h_max: Option<f64>,

    /// 0-indexed rank on the `h`-sorted frontier used to tighten `hMax`.
    /// Default: 1 (the second-ranked point).
    pub h_max_rank: usize,

    /// Discontinuity exclusion; `None` gives the plain progressive barrier.
    pub exclusion: Option<ExclusionConfig>,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            dimension: 1,
            eval_tag: EvalTag::default(),
            h_max: None,
            h_max_rank: DEFAULT_H_MAX_RANK,
            exclusion: None,
        }
    }
}

impl BarrierConfig {
    /// Configuration for points of the given dimension.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Sets the evaluation tag.
    #[must_use]
    pub fn with_eval_tag(mut self, tag: EvalTag) -> Self {
        self.eval_tag = tag;
        self
    }

    /// Sets the initial threshold.
    #[must_use]
    pub fn with_initial_h_max(mut self, h_max: f64) -> Self {
        self.h_max = Some(h_max);
        self
    }

    /// Sets the frontier rank used for threshold tightening.
    #[must_use]
    pub fn with_h_max_rank(mut self, rank: usize) -> Self {
        self.h_max_rank = rank;
        self
    }

    /// Enables discontinuity exclusion with the given radius.
    #[must_use]
    pub fn with_exclusion_radius(mut self, radius: f64) -> Self {
        self.exclusion = Some(ExclusionConfig::new(radius));
        self
    }

    /// Initial threshold, `+∞` when unbounded.
    pub fn initial_h_max(&self) -> f64 {
        self.h_max.unwrap_or(f64::INFINITY)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(BarrierError::invalid_hyperparameter(
                "dimension",
                self.dimension,
                ">= 1",
            ));
        }
        if let Some(h_max) = self.h_max {
            if h_max.is_nan() || h_max < 0.0 {
                return Err(BarrierError::invalid_hyperparameter("h_max", h_max, ">= 0"));
            }
        }
        if let Some(exclusion) = &self.exclusion {
            exclusion.validate()?;
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
