//! Aspect-ratio policy and cross-axis balancing.
//!
//! After each axis is resolved independently, [`balance`] nudges one of them
//! so the content area matches the requested ratio. Width is always tried
//! first; height only when width is fixed or its proposal is rejected. If
//! neither proposal fits the constraints, the independent sizes stand.

use num_traits::Float;

use crate::constraint::{AxisConstraint, AxisLimits, IntrinsicSize, is_acceptable};
use crate::transform::round_px;

/// Ratios closer than this are treated as equal, so repeated passes over
/// an already-balanced box do not oscillate on float round-off.
pub const ASPECT_EPSILON: f64 = 1e-7;

/// How the box's aspect ratio is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum AspectPolicy {
    /// The box does not try to keep any ratio.
    #[default]
    None,
    /// Keep the content's intrinsic `width / height`.
    MatchContent,
    /// Keep the given `width / height`. Must be positive.
    Explicit(f64),
}

impl AspectPolicy {
    /// Explicit ratio; non-positive or non-finite ratios become [`None`](Self::None).
    pub fn explicit(ratio: f64) -> Self {
        if ratio > 0.0 && ratio.is_finite() {
            Self::Explicit(ratio)
        } else {
            Self::None
        }
    }

    /// Decode the widget attribute encoding: negative (or NaN) is no ratio,
    /// `0.0` follows the content, positive is an explicit ratio.
    pub fn from_raw(value: f32) -> Self {
        if value == 0.0 {
            Self::MatchContent
        } else {
            Self::explicit(value as f64)
        }
    }

    /// Whether any ratio is requested.
    pub fn is_active(&self) -> bool {
        !matches!(self.normalize(), Self::None)
    }

    /// Collapse invalid explicit ratios to [`None`](Self::None).
    pub fn normalize(self) -> Self {
        match self {
            Self::Explicit(r) => Self::explicit(r),
            other => other,
        }
    }

    /// The target ratio for this pass, if one applies.
    ///
    /// `MatchContent` needs content whose intrinsic size is fully known.
    pub fn resolve(&self, content: Option<&IntrinsicSize>) -> Option<f64> {
        match self.normalize() {
            Self::None => None,
            Self::Explicit(r) => Some(r),
            Self::MatchContent => content.and_then(IntrinsicSize::aspect_ratio),
        }
    }
}

/// One axis as seen by the balancer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisInput {
    /// Provisional size from independent resolution (padding included).
    pub size: u32,
    pub limits: AxisLimits,
    pub constraint: AxisConstraint,
    /// Padding on this axis; excluded from the ratio.
    pub padding: u32,
}

impl AxisInput {
    fn content(&self) -> u32 {
        self.size.saturating_sub(self.padding)
    }

    fn propose(&self, content: f64) -> u32 {
        // Float-to-int `as` saturates; NaN becomes 0.
        (round_px(content) as u32).saturating_add(self.padding)
    }

    fn accepts(&self, size: u32) -> bool {
        is_acceptable(size, self.limits, self.constraint)
    }
}

/// Adjust `(width, height)` toward `ratio` (`width / height` of the content
/// area). Returns the provisional sizes unchanged when the ratio already
/// holds or no adjustment is acceptable.
pub fn balance(width: AxisInput, height: AxisInput, ratio: f64) -> (u32, u32) {
    let (w, h) = (width.size, height.size);
    let content_w = width.content() as f64;
    let content_h = height.content() as f64;

    let actual = content_w / content_h;
    if Float::abs(actual - ratio) <= ASPECT_EPSILON {
        return (w, h);
    }

    if width.constraint.is_resizable() {
        let proposed = width.propose(ratio * content_h);
        if width.accepts(proposed) {
            return (proposed, h);
        }
        log::trace!("aspect {ratio}: width {proposed} rejected ({w}x{h})");
    }

    if height.constraint.is_resizable() {
        let proposed = height.propose(content_w / ratio);
        if height.accepts(proposed) {
            return (w, proposed);
        }
        log::trace!("aspect {ratio}: height {proposed} rejected ({w}x{h})");
    }

    (w, h)
}
