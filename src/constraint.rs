//! Per-axis size resolution against host constraints and min/max limits.
//!
//! The layout host hands each axis an [`AxisConstraint`]. Resolution turns a
//! desired size into a concrete one, and [`is_acceptable`] lets the aspect
//! balancer test a proposal without committing to it.
//!
//! # Example
//!
//! ```
//! use zenfit::{AxisConstraint, AxisLimits, resolve_axis};
//!
//! let limits = AxisLimits::new(0, 300);
//! assert_eq!(resolve_axis(500, limits, AxisConstraint::at_most(400)), 300);
//! assert_eq!(resolve_axis(500, limits, AxisConstraint::exact(640)), 640);
//! ```

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Natural size of the content, if known.
///
/// Either axis may be unknown (vector content without a fixed size, a
/// solid color, a placeholder that has not decoded yet).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntrinsicSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl IntrinsicSize {
    /// Both axes unknown.
    pub const UNKNOWN: Self = Self {
        width: None,
        height: None,
    };

    /// Both axes known.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Decode the signed encoding where any negative value means "unknown".
    pub fn from_raw(width: i32, height: i32) -> Self {
        Self {
            width: u32::try_from(width).ok(),
            height: u32::try_from(height).ok(),
        }
    }

    /// Both axes, when both are known and non-zero.
    pub fn known(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Size::new(w, h)),
            _ => None,
        }
    }

    /// `width / height`, when both are known and non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.known()
            .map(|s| s.width as f64 / s.height as f64)
    }

    /// Size to request during measurement. Unknown or zero axes count as 1.
    pub(crate) fn measure_size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(1).max(1),
            self.height.unwrap_or(1).max(1),
        )
    }
}

/// Space reserved inside the box around the content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0);

    /// Padding in CSS order: top, right, bottom, left.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same padding on every edge.
    pub const fn uniform(all: u32) -> Self {
        Self::new(all, all, all, all)
    }

    /// `left + right`.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

/// How the host constrains one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MeasureMode {
    /// The axis must be exactly the given size.
    Exact,
    /// The axis may be anything up to the given size.
    AtMost,
    /// The axis may be as large as it wants.
    #[default]
    Unconstrained,
}

/// One axis of the host's measurement constraint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisConstraint {
    pub mode: MeasureMode,
    pub size: u32,
}

impl AxisConstraint {
    /// No constraint on this axis.
    pub const UNCONSTRAINED: Self = Self {
        mode: MeasureMode::Unconstrained,
        size: 0,
    };

    /// Axis must be exactly `size`.
    pub const fn exact(size: u32) -> Self {
        Self {
            mode: MeasureMode::Exact,
            size,
        }
    }

    /// Axis may be at most `size`.
    pub const fn at_most(size: u32) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    /// Whether the box may choose its own size on this axis.
    pub fn is_resizable(&self) -> bool {
        self.mode != MeasureMode::Exact
    }
}

/// Min/max bounds for one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisLimits {
    pub min: u32,
    pub max: u32,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::NONE
    }
}

impl AxisLimits {
    /// `0..=u32::MAX`.
    pub const NONE: Self = Self {
        min: 0,
        max: u32::MAX,
    };

    /// Create axis limits. `min <= max` is the caller's responsibility.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Cap at `max`, then raise to `min`.
    ///
    /// Unlike [`Ord::clamp`] this does not panic on inverted limits; `min`
    /// wins.
    pub fn clamp(&self, v: u32) -> u32 {
        v.min(self.max).max(self.min)
    }

    /// Whether `v` lies within `min..=max`.
    pub fn contains(&self, v: u32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Min/max bounds for the whole box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundingLimits {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for BoundingLimits {
    fn default() -> Self {
        Self::NONE
    }
}

impl BoundingLimits {
    /// No limits on either axis.
    pub const NONE: Self = Self {
        min_width: 0,
        min_height: 0,
        max_width: u32::MAX,
        max_height: u32::MAX,
    };

    /// Set the minimum size.
    pub fn min(mut self, width: u32, height: u32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Set the maximum size.
    pub fn max(mut self, width: u32, height: u32) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Limits on the horizontal axis.
    pub fn width(&self) -> AxisLimits {
        AxisLimits::new(self.min_width, self.max_width)
    }

    /// Limits on the vertical axis.
    pub fn height(&self) -> AxisLimits {
        AxisLimits::new(self.min_height, self.max_height)
    }
}

/// Resolve one axis for a box that is allowed to resize.
pub fn resolve_axis(desired: u32, limits: AxisLimits, constraint: AxisConstraint) -> u32 {
    match constraint.mode {
        MeasureMode::Exact => constraint.size,
        MeasureMode::AtMost => limits.clamp(desired.min(constraint.size)),
        MeasureMode::Unconstrained => limits.clamp(desired),
    }
}

/// Whether a proposed size satisfies both the limits and the constraint.
pub fn is_acceptable(size: u32, limits: AxisLimits, constraint: AxisConstraint) -> bool {
    match constraint.mode {
        MeasureMode::Exact => size == constraint.size,
        MeasureMode::AtMost => size <= constraint.size && limits.contains(size),
        MeasureMode::Unconstrained => limits.contains(size),
    }
}

/// Resolve one axis for a box that keeps its natural size.
///
/// Returns the size and whether the constraint was too small for the
/// desired size. Limits are not consulted here; the caller folds the
/// minimum into `desired` beforehand.
pub fn resolve_final(desired: u32, constraint: AxisConstraint) -> (u32, bool) {
    match constraint.mode {
        MeasureMode::AtMost if constraint.size < desired => (constraint.size, true),
        MeasureMode::AtMost | MeasureMode::Unconstrained => (desired, false),
        MeasureMode::Exact => (constraint.size, false),
    }
}
