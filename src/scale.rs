//! Scale policies and draw placement.
//!
//! [`compute_placement`] turns a [`ScalePolicy`] into a concrete transform
//! from content space into the destination rect. Results are expressed in
//! the destination's coordinate space, origin included, so a renderer can
//! apply them without further offsets.
//!
//! ```text
//!     Center        CenterCrop      CenterInside     FitStart   FitEnd
//!   ┌────────┐    ┌──┬─────┬──┐    ┌────────┐     ┌────────┐ ┌────────┐
//!   │  ┌──┐  │    │  │     │  │    │┌──────┐│     │┌──────┐│ │        │
//!   │  └──┘  │    │  │     │  │    │└──────┘│     │└──────┘│ │┌──────┐│
//!   └────────┘    └──┴─────┴──┘    └────────┘     │        │ │└──────┘│
//!   no scaling    cover + clip     shrink only    └────────┘ └────────┘
//! ```

use crate::constraint::IntrinsicSize;
use crate::transform::{Affine, Rect, ScaleToFit, round_px};

/// Sub-pixel slack allowed when checking containment, so float round-off
/// in a scale factor does not register as overflow.
const EDGE_TOLERANCE: f64 = 1e-6;

/// How content is mapped into its destination box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalePolicy {
    /// Use the caller's matrix as-is.
    Matrix,
    /// Stretch to the destination on both axes, ignoring aspect ratio.
    FillExact,
    /// Uniform fit, aligned to the top-left.
    FitStart,
    /// Uniform fit, centered.
    #[default]
    FitCenter,
    /// Uniform fit, aligned to the bottom-right.
    FitEnd,
    /// Center without scaling.
    Center,
    /// Uniform scale to cover the destination, centered; overflow is clipped.
    CenterCrop,
    /// Like [`FitCenter`](Self::FitCenter), but never upscales.
    CenterInside,
}

impl ScalePolicy {
    /// All policies, in attribute index order.
    pub const ALL: [Self; 8] = [
        Self::Matrix,
        Self::FillExact,
        Self::FitStart,
        Self::FitCenter,
        Self::FitEnd,
        Self::Center,
        Self::CenterCrop,
        Self::CenterInside,
    ];

    /// Decode the widget attribute index (0-7). Returns `None` for invalid values.
    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Attribute index (0-7).
    pub fn to_raw(self) -> u8 {
        self as u8
    }

    /// The rect-to-rect alignment this policy delegates to, if any.
    pub fn scale_to_fit(self) -> Option<ScaleToFit> {
        match self {
            Self::FillExact => Some(ScaleToFit::Fill),
            Self::FitStart => Some(ScaleToFit::Start),
            Self::FitCenter => Some(ScaleToFit::Center),
            Self::FitEnd => Some(ScaleToFit::End),
            Self::Matrix | Self::Center | Self::CenterCrop | Self::CenterInside => None,
        }
    }
}

/// Where and how to draw the content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawPlacement {
    /// Rect the content is drawn into before `transform` is applied.
    ///
    /// When `transform` is `None` this is already in destination space.
    pub bounds: Rect,
    /// Content-to-destination map. `None` means draw at `bounds` directly.
    pub transform: Option<Affine>,
    /// Clip to apply while drawing, in destination space.
    pub clip: Option<Rect>,
}

impl DrawPlacement {
    /// Content stretched over `dest` with no transform.
    pub fn fill(dest: Rect) -> Self {
        Self {
            bounds: dest,
            transform: None,
            clip: None,
        }
    }

    /// The transform, or identity when none is needed.
    pub fn matrix(&self) -> Affine {
        self.transform.unwrap_or(Affine::IDENTITY)
    }

    /// Where the content ends up, in destination space.
    pub fn content_rect(&self) -> Rect {
        match &self.transform {
            Some(t) => t.map_rect(self.bounds),
            None => self.bounds,
        }
    }

    /// Whether the placed content covers all of `area`.
    ///
    /// Transforms that do not keep rects axis-aligned report `false`.
    pub fn covers(&self, area: Rect) -> bool {
        if let Some(t) = &self.transform
            && !t.rect_stays_rect()
        {
            return false;
        }
        contains(&self.content_rect(), &area)
    }
}

fn contains(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x - EDGE_TOLERANCE
        && inner.y >= outer.y - EDGE_TOLERANCE
        && inner.right() <= outer.right() + EDGE_TOLERANCE
        && inner.bottom() <= outer.bottom() + EDGE_TOLERANCE
}

/// Compute how to draw content of `intrinsic` size into `dest` under `policy`.
///
/// Content without a known, positive size is stretched over `dest`, as is
/// everything under [`ScalePolicy::FillExact`]. `custom` is only consulted
/// for [`ScalePolicy::Matrix`]. When the placed content spills outside
/// `dest`, `clip` is set to `dest`.
pub fn compute_placement(
    intrinsic: IntrinsicSize,
    dest: Rect,
    policy: ScalePolicy,
    custom: Option<&Affine>,
) -> DrawPlacement {
    let content = match intrinsic.known() {
        Some(c) if policy != ScalePolicy::FillExact => c,
        _ => return DrawPlacement::fill(dest),
    };

    let (cw, ch) = (content.width as f64, content.height as f64);
    let (vw, vh) = (dest.width, dest.height);
    let at_origin = Rect::at_origin(cw, ch);
    let in_dest = Rect::new(dest.x, dest.y, cw, ch);

    // Transform in dest-local coordinates; `None` keeps the content at its
    // own size in the dest's top-left corner.
    let local = match policy {
        ScalePolicy::Matrix => custom.copied().filter(|m| !m.is_identity()),
        // Exact fit needs no transform whatever the policy.
        _ if cw == vw && ch == vh => None,
        ScalePolicy::Center => Some(Affine::translate(
            round_px((vw - cw) * 0.5),
            round_px((vh - ch) * 0.5),
        )),
        ScalePolicy::CenterCrop => {
            let (scale, dx, dy) = if cw * vh > vw * ch {
                let s = vh / ch;
                (s, (vw - cw * s) * 0.5, 0.0)
            } else {
                let s = vw / cw;
                (s, 0.0, (vh - ch * s) * 0.5)
            };
            Some(Affine::uniform_scale(scale).then_translate(round_px(dx), round_px(dy)))
        }
        ScalePolicy::CenterInside => {
            let scale = if cw <= vw && ch <= vh {
                1.0
            } else {
                (vw / cw).min(vh / ch)
            };
            Some(Affine::uniform_scale(scale).then_translate(
                round_px((vw - cw * scale) * 0.5),
                round_px((vh - ch * scale) * 0.5),
            ))
        }
        ScalePolicy::FitStart
        | ScalePolicy::FitCenter
        | ScalePolicy::FitEnd
        | ScalePolicy::FillExact => {
            let fit = policy.scale_to_fit().unwrap_or(ScaleToFit::Fill);
            let t = Affine::fit_rect(at_origin, Rect::at_origin(vw, vh), fit);
            Some(t.snap_translation())
        }
    };

    let mut placement = match local {
        Some(t) => DrawPlacement {
            bounds: at_origin,
            transform: Some(t.then_translate(dest.x, dest.y)),
            clip: None,
        },
        None => DrawPlacement {
            bounds: in_dest,
            transform: None,
            clip: None,
        },
    };

    if !contains(&dest, &placement.content_rect()) {
        placement.clip = Some(dest);
    }
    placement
}
