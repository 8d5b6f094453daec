//! Fit content into a negotiable box: constraint-based size resolution and
//! scale transforms.
//!
//! Pure geometry with no pixel operations. The core is `no_std` compatible
//! and does not allocate.
//!
//! # Modules
//!
//! - [`constraint`]: Host constraints, min/max limits, per-axis size resolution
//! - [`aspect`]: Aspect-ratio policy and cross-axis balancing
//! - [`transform`]: 2D affine transforms and rect-to-rect fitting
//! - [`scale`]: Scale policies (FitCenter, CenterCrop, …) and draw placement
//! - [`pipeline`]: Stateful measure/place orchestration with host callbacks
//! - `svg`: SVG visualization of a placement (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod aspect;
pub mod constraint;
pub mod pipeline;
pub mod scale;
#[cfg(feature = "svg")]
pub mod svg;
pub mod transform;

// Re-exports: core types from each stage
pub use aspect::{AspectPolicy, balance};
pub use constraint::{
    AxisConstraint, AxisLimits, BoundingLimits, IntrinsicSize, MeasureMode, Padding, Size,
    is_acceptable, resolve_axis, resolve_final,
};
pub use pipeline::{
    ContentHost, FitError, FitPipeline, FitState, ResolvedBox, place_content, resolve_box,
};
pub use scale::{DrawPlacement, ScalePolicy, compute_placement};
pub use transform::{Affine, Rect, ScaleToFit};
