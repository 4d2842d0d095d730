//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_barrier::prelude::*;
//! ```

pub use crate::barrier::{
    BarrierConfig, Classification, DiscontinuityExclusion, ExclusionConfig, ProgressiveBarrier,
    SuccessType, UpdateOutcome,
};
pub use crate::error::{BarrierError, Result};
pub use crate::point::{ComputeType, EvalPoint, EvalTag, EvalType, Evaluation};
