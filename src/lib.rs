//! Progressive constraint barrier for derivative-free optimization.
//!
//! Direct-search methods (MADS and relatives) evaluate batches of trial
//! points and need to decide, after each batch, which points become the new
//! incumbents. This crate owns that decision: it keeps the best feasible
//! points, a Pareto frontier of infeasible points in (objective, violation)
//! space, and a progressively tightening violation threshold `hMax`.
//! Optionally it excludes points lying close to revealed discontinuities.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use aprender_barrier::prelude::*;
//!
//! let config = BarrierConfig::new(2).with_exclusion_radius(0.5);
//! let mut barrier = ProgressiveBarrier::new(config).unwrap();
//!
//! // A discontinuity was detected at the origin
//! barrier
//!     .register_revealing_point(Arc::new(EvalPoint::evaluated(vec![0.0, 0.0], 0.0, 0.0)))
//!     .unwrap();
//!
//! let batch = vec![
//!     Arc::new(EvalPoint::evaluated(vec![0.1, 0.1], -1.0, 0.0)), // too close
//!     Arc::new(EvalPoint::evaluated(vec![2.0, 0.0], 3.0, 0.0)),
//!     Arc::new(EvalPoint::evaluated(vec![1.0, 1.0], 1.0, 0.4)),
//! ];
//! let outcome = barrier.update(&batch, false, true).unwrap();
//!
//! assert!(outcome.improved);
//! assert_eq!(outcome.classifications[0], Classification::ExcludedByProximity);
//! assert_eq!(barrier.best_feasible().unwrap().coordinates(), &[2.0, 0.0]);
//! assert!((barrier.h_max() - 0.4).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! - [`point`]: Evaluated points, evaluation tags, violation aggregation
//! - [`barrier`]: Dominance order, frontier extraction, the barrier itself
//! - [`error`]: Error types
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade; install any logger to see
//! threshold changes and rejected points.

pub mod barrier;
pub mod error;
pub mod point;
pub mod prelude;

pub use barrier::{BarrierConfig, ProgressiveBarrier, UpdateOutcome};
pub use error::{BarrierError, Result};
pub use point::{EvalPoint, EvalTag, Evaluation};
