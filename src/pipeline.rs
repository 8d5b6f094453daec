//! Measure/place orchestration with cached results.
//!
//! [`FitPipeline`] owns the inputs an embedding widget can change, runs size
//! resolution on [`measure`](FitPipeline::measure) and placement on
//! [`place`](FitPipeline::place), and caches the latest results until an
//! input changes.
//!
//! ```text
//!   Uninitialized ──measure──▶ Measured ──place──▶ Placed
//!                                 ▲                  │ setter / invalidate
//!                                 └──measure/refresh─ Stale
//! ```
//!
//! # Example
//!
//! ```
//! use zenfit::{AxisConstraint, FitPipeline, IntrinsicSize, ScalePolicy};
//!
//! let mut fit = FitPipeline::default()
//!     .with_content(IntrinsicSize::new(100, 100))
//!     .with_scale_policy(ScalePolicy::CenterInside);
//!
//! let resolved = fit.measure(AxisConstraint::exact(50), AxisConstraint::exact(200));
//! let placement = fit.place(resolved);
//! let t = placement.transform.unwrap();
//! assert_eq!(t.scale_factors(), (0.5, 0.5));
//! assert_eq!(t.translation(), (0.0, 75.0));
//! ```

use core::fmt;

use crate::aspect::{AspectPolicy, AxisInput, balance};
use crate::constraint::{
    AxisConstraint, BoundingLimits, IntrinsicSize, Padding, Size, resolve_axis, resolve_final,
};
use crate::scale::{DrawPlacement, ScalePolicy, compute_placement};
use crate::transform::{Affine, Rect};

/// Callbacks into the embedding host when an input change needs a new pass.
pub trait ContentHost {
    /// The box size may change; schedule a new measure pass.
    fn request_relayout(&mut self);
    /// The drawing may change; schedule a redraw.
    fn request_redraw(&mut self);
}

/// No host; notifications are dropped.
impl ContentHost for () {
    fn request_relayout(&mut self) {}
    fn request_redraw(&mut self) {}
}

impl<T: ContentHost + ?Sized> ContentHost for &mut T {
    fn request_relayout(&mut self) {
        (**self).request_relayout();
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw();
    }
}

/// Where the pipeline is in its measure/place cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitState {
    /// Nothing measured yet.
    #[default]
    Uninitialized,
    /// Box resolved, placement not computed.
    Measured,
    /// Box and placement both current.
    Placed,
    /// An input changed since the last pass.
    Stale,
}

/// Final size of the box, padding included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResolvedBox {
    pub width: u32,
    pub height: u32,
    /// A capped axis could not reach the size the content asked for.
    pub too_small: bool,
}

impl ResolvedBox {
    /// A box that fit its constraints.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            too_small: false,
        }
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The area left for content once `padding` is taken out, positioned at
    /// the padding offset. Collapses to zero size when padding exceeds the box.
    pub fn content_rect(&self, padding: &Padding) -> Rect {
        Rect::new(
            padding.left as f64,
            padding.top as f64,
            self.width.saturating_sub(padding.horizontal()) as f64,
            self.height.saturating_sub(padding.vertical()) as f64,
        )
    }
}

/// Pipeline error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitError {
    /// No constraints have been supplied yet, so there is nothing to re-run.
    NotMeasured,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMeasured => f.write_str("pipeline has not been measured"),
        }
    }
}

impl core::error::Error for FitError {}

/// Resolve the box for `content` under a pair of host constraints.
///
/// With an active aspect ratio and at least one resizable axis, each axis
/// is resolved against its limits and then balanced toward the ratio.
/// Otherwise each axis keeps its natural size (raised to the minimum) and
/// only the host constraint is applied.
pub fn resolve_box(
    content: Option<&IntrinsicSize>,
    aspect: AspectPolicy,
    limits: &BoundingLimits,
    padding: &Padding,
    width: AxisConstraint,
    height: AxisConstraint,
) -> ResolvedBox {
    let natural = content.map_or(Size::new(0, 0), IntrinsicSize::measure_size);
    let desired_w = natural.width.saturating_add(padding.horizontal());
    let desired_h = natural.height.saturating_add(padding.vertical());

    if let Some(ratio) = aspect.resolve(content)
        && (width.is_resizable() || height.is_resizable())
    {
        let w = AxisInput {
            size: resolve_axis(desired_w, limits.width(), width),
            limits: limits.width(),
            constraint: width,
            padding: padding.horizontal(),
        };
        let h = AxisInput {
            size: resolve_axis(desired_h, limits.height(), height),
            limits: limits.height(),
            constraint: height,
            padding: padding.vertical(),
        };
        let (bw, bh) = balance(w, h, ratio);
        return ResolvedBox::new(bw, bh);
    }

    let (bw, small_w) = resolve_final(desired_w.max(limits.min_width), width);
    let (bh, small_h) = resolve_final(desired_h.max(limits.min_height), height);
    ResolvedBox {
        width: bw,
        height: bh,
        too_small: small_w || small_h,
    }
}

/// Compute the draw placement for `content` inside `resolved` less `padding`.
///
/// With no content the placement simply fills the content area.
pub fn place_content(
    content: Option<&IntrinsicSize>,
    resolved: &ResolvedBox,
    padding: &Padding,
    policy: ScalePolicy,
    matrix: &Affine,
    crop_to_padding: bool,
) -> DrawPlacement {
    let dest = resolved.content_rect(padding);
    let mut placement = match content {
        Some(intrinsic) => compute_placement(*intrinsic, dest, policy, Some(matrix)),
        None => DrawPlacement::fill(dest),
    };
    if crop_to_padding {
        placement.clip = Some(dest);
    }
    placement
}

/// Stateful fit pipeline for one piece of content.
///
/// Single-threaded; callers sharing an instance across threads must
/// serialize access themselves.
#[derive(Clone, Debug)]
pub struct FitPipeline<H: ContentHost = ()> {
    host: H,
    content: Option<IntrinsicSize>,
    scale_policy: ScalePolicy,
    aspect_policy: AspectPolicy,
    limits: BoundingLimits,
    padding: Padding,
    matrix: Affine,
    crop_to_padding: bool,
    baseline: Option<u32>,
    baseline_align_bottom: bool,

    constraints: Option<(AxisConstraint, AxisConstraint)>,
    resolved: Option<ResolvedBox>,
    placement: Option<DrawPlacement>,
    state: FitState,

    // Survive `invalidate`: the box the host last laid out, the height of
    // the last measure pass, and whether a change since needs a new measure.
    placed_box: Option<ResolvedBox>,
    measured_height: Option<u32>,
    needs_measure: bool,
}

impl Default for FitPipeline<()> {
    fn default() -> Self {
        Self::new(())
    }
}

impl<H: ContentHost> FitPipeline<H> {
    /// Create a pipeline that notifies `host` on input changes.
    pub fn new(host: H) -> Self {
        Self {
            host,
            content: None,
            scale_policy: ScalePolicy::default(),
            aspect_policy: AspectPolicy::None,
            limits: BoundingLimits::NONE,
            padding: Padding::ZERO,
            matrix: Affine::IDENTITY,
            crop_to_padding: false,
            baseline: None,
            baseline_align_bottom: false,
            constraints: None,
            resolved: None,
            placement: None,
            state: FitState::Uninitialized,
            placed_box: None,
            measured_height: None,
            needs_measure: false,
        }
    }

    // ── construction-time builders (no host notification) ──────────────

    /// Set content of the given intrinsic size.
    pub fn with_content(mut self, content: IntrinsicSize) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the scale policy.
    pub fn with_scale_policy(mut self, policy: ScalePolicy) -> Self {
        self.scale_policy = policy;
        self
    }

    /// Set the aspect policy.
    pub fn with_aspect_policy(mut self, policy: AspectPolicy) -> Self {
        self.aspect_policy = policy.normalize();
        self
    }

    /// Set min/max limits.
    pub fn with_limits(mut self, limits: BoundingLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set the custom matrix used by [`ScalePolicy::Matrix`].
    pub fn with_matrix(mut self, matrix: Affine) -> Self {
        self.matrix = matrix;
        self
    }

    // ── passes ──────────────────────────────────────────────────────────

    /// Resolve the box size under the host's constraints.
    pub fn measure(&mut self, width: AxisConstraint, height: AxisConstraint) -> ResolvedBox {
        let resolved = resolve_box(
            self.content.as_ref(),
            self.aspect_policy,
            &self.limits,
            &self.padding,
            width,
            height,
        );
        log::debug!("measure {width:?} x {height:?} -> {resolved:?}");
        self.constraints = Some((width, height));
        self.resolved = Some(resolved);
        self.placement = None;
        self.placed_box = None;
        self.measured_height = Some(resolved.height);
        self.needs_measure = false;
        self.transition(FitState::Measured);
        resolved
    }

    /// Compute the draw placement for the box the host settled on.
    pub fn place(&mut self, resolved: ResolvedBox) -> DrawPlacement {
        let placement = place_content(
            self.content.as_ref(),
            &resolved,
            &self.padding,
            self.scale_policy,
            &self.matrix,
            self.crop_to_padding,
        );
        log::debug!("place {}x{} -> {placement:?}", resolved.width, resolved.height);
        self.resolved = Some(resolved);
        self.placement = Some(placement);
        self.placed_box = Some(resolved);
        self.transition(FitState::Placed);
        placement
    }

    /// Return the current placement, recomputing it if anything changed.
    ///
    /// Changes that only need a redraw are placed again into the box the
    /// host last laid out. Changes that requested a relayout re-run both
    /// passes with the last constraints.
    pub fn refresh(&mut self) -> Result<DrawPlacement, FitError> {
        if self.state == FitState::Placed
            && let Some(placement) = self.placement
        {
            return Ok(placement);
        }
        if !self.needs_measure
            && let Some(resolved) = self.placed_box
        {
            return Ok(self.place(resolved));
        }
        let (width, height) = self.constraints.ok_or(FitError::NotMeasured)?;
        let resolved = self.measure(width, height);
        Ok(self.place(resolved))
    }

    /// Drop cached results; the next [`refresh`](Self::refresh) recomputes.
    pub fn invalidate(&mut self) {
        if self.state != FitState::Uninitialized {
            self.resolved = None;
            self.placement = None;
            self.transition(FitState::Stale);
        }
    }

    fn transition(&mut self, next: FitState) {
        if self.state != next {
            log::debug!("fit state {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }

    fn changed(&mut self, relayout: bool, redraw: bool) {
        self.invalidate();
        if relayout {
            self.needs_measure = true;
            self.host.request_relayout();
        }
        if redraw {
            self.host.request_redraw();
        }
    }

    // ── setters ─────────────────────────────────────────────────────────

    /// Replace the content. `None` means there is nothing to draw.
    ///
    /// Always requests a redraw; requests a relayout only when the
    /// intrinsic size differs from the previous content's.
    pub fn set_content(&mut self, content: Option<IntrinsicSize>) {
        if self.content != content {
            self.content = content;
            self.changed(true, false);
        }
        self.host.request_redraw();
    }

    /// Replace the content with content of the given intrinsic size.
    pub fn set_intrinsic_size(&mut self, size: IntrinsicSize) {
        self.set_content(Some(size));
    }

    /// Remove the content.
    pub fn clear_content(&mut self) {
        self.set_content(None);
    }

    /// Change the scale policy.
    pub fn set_scale_policy(&mut self, policy: ScalePolicy) {
        if self.scale_policy != policy {
            self.scale_policy = policy;
            self.changed(true, true);
        }
    }

    /// Change the aspect policy. Invalid explicit ratios become
    /// [`AspectPolicy::None`].
    pub fn set_aspect_policy(&mut self, policy: AspectPolicy) {
        let policy = policy.normalize();
        if self.aspect_policy != policy {
            self.aspect_policy = policy;
            self.changed(true, true);
        }
    }

    /// Change the min/max limits.
    pub fn set_limits(&mut self, limits: BoundingLimits) {
        if self.limits != limits {
            self.limits = limits;
            self.changed(true, false);
        }
    }

    /// Change the padding.
    pub fn set_padding(&mut self, padding: Padding) {
        if self.padding != padding {
            self.padding = padding;
            self.changed(true, true);
        }
    }

    /// Change the custom matrix used by [`ScalePolicy::Matrix`].
    pub fn set_matrix(&mut self, matrix: Affine) {
        if self.matrix != matrix {
            self.matrix = matrix;
            self.changed(false, true);
        }
    }

    /// Clip drawing to the padded content area.
    pub fn set_crop_to_padding(&mut self, crop: bool) {
        if self.crop_to_padding != crop {
            self.crop_to_padding = crop;
            self.changed(true, true);
        }
    }

    /// Set the baseline offset from the top of the box.
    pub fn set_baseline(&mut self, baseline: Option<u32>) {
        if self.baseline != baseline {
            self.baseline = baseline;
            self.host.request_relayout();
        }
    }

    /// Report the bottom of the box as the baseline, overriding
    /// [`set_baseline`](Self::set_baseline).
    pub fn set_baseline_align_bottom(&mut self, aligned: bool) {
        if self.baseline_align_bottom != aligned {
            self.baseline_align_bottom = aligned;
            self.host.request_relayout();
        }
    }

    // ── accessors ───────────────────────────────────────────────────────

    /// Where the pipeline is in its measure/place cycle.
    pub fn state(&self) -> FitState {
        self.state
    }

    /// Last resolved box, unless invalidated since.
    pub fn resolved_box(&self) -> Option<ResolvedBox> {
        self.resolved
    }

    /// Last placement, unless invalidated or re-measured since.
    pub fn placement(&self) -> Option<&DrawPlacement> {
        self.placement.as_ref()
    }

    /// Current draw transform, identity when none applies.
    pub fn image_matrix(&self) -> Affine {
        self.placement
            .as_ref()
            .map_or(Affine::IDENTITY, DrawPlacement::matrix)
    }

    /// Whether the placed content covers the whole box.
    pub fn is_filled_by_content(&self) -> bool {
        match (&self.placement, &self.resolved, &self.content) {
            (Some(p), Some(r), Some(_)) => {
                p.covers(Rect::at_origin(r.width as f64, r.height as f64))
            }
            _ => false,
        }
    }

    /// Baseline offset from the top of the box, if any.
    ///
    /// Bottom alignment reports the height of the last measure pass, which
    /// stays valid until the next one.
    pub fn baseline(&self) -> Option<u32> {
        if self.baseline_align_bottom {
            self.measured_height
        } else {
            self.baseline
        }
    }

    /// Current content, if any.
    pub fn content(&self) -> Option<&IntrinsicSize> {
        self.content.as_ref()
    }

    /// Current scale policy.
    pub fn scale_policy(&self) -> ScalePolicy {
        self.scale_policy
    }

    /// Current aspect policy, already normalized.
    pub fn aspect_policy(&self) -> AspectPolicy {
        self.aspect_policy
    }

    /// Current min/max limits.
    pub fn limits(&self) -> &BoundingLimits {
        &self.limits
    }

    /// Current padding.
    pub fn padding(&self) -> &Padding {
        &self.padding
    }

    /// Custom matrix used by [`ScalePolicy::Matrix`].
    pub fn matrix(&self) -> &Affine {
        &self.matrix
    }

    /// Whether drawing is clipped to the padded content area.
    pub fn crop_to_padding(&self) -> bool {
        self.crop_to_padding
    }

    /// The notified host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The notified host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
