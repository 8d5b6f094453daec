//! 2D affine transforms and rect-to-rect fitting.
//!
//! [`Affine`] is the draw transform handed back to the renderer. It maps
//! content space (the content's own pixels, origin at its top-left) into
//! destination space (the resolved box).

use num_traits::Float;

/// Round to the nearest whole pixel, halves toward positive infinity.
///
/// Used for every snapped translation so that a placement computed twice
/// lands on the same pixel, including for negative offsets.
pub(crate) fn round_px(v: f64) -> f64 {
    Float::floor(v + 0.5)
}

/// Axis-aligned rectangle in floating-point destination coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect of the given size with its top-left corner at the origin.
    pub const fn at_origin(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the rect has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Alignment used by [`Affine::fit_rect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScaleToFit {
    /// Scale each axis independently so `src` exactly covers `dst`.
    Fill,
    /// Uniform scale, slack placed after the content (top/left aligned).
    Start,
    /// Uniform scale, slack split evenly on both sides.
    Center,
    /// Uniform scale, slack placed before the content (bottom/right aligned).
    End,
}

/// A 2D affine map.
///
/// ```text
///     x' = xx·x + xy·y + tx
///     y' = yx·x + yy·y + ty
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The identity map.
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Construct from coefficients in `[xx, yx, xy, yy, tx, ty]` order.
    pub const fn new(coeffs: [f64; 6]) -> Self {
        Self {
            xx: coeffs[0],
            yx: coeffs[1],
            xy: coeffs[2],
            yy: coeffs[3],
            tx: coeffs[4],
            ty: coeffs[5],
        }
    }

    /// Coefficients in `[xx, yx, xy, yy, tx, ty]` order.
    pub const fn coeffs(&self) -> [f64; 6] {
        [self.xx, self.yx, self.xy, self.yy, self.tx, self.ty]
    }

    /// Non-uniform scale about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Uniform scale about the origin.
    pub const fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Pure translation.
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// Whether this is exactly the identity map.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Compose: apply `self` first, then `other`.
    pub fn then(self, other: Self) -> Self {
        Self {
            xx: other.xx * self.xx + other.xy * self.yx,
            yx: other.yx * self.xx + other.yy * self.yx,
            xy: other.xx * self.xy + other.xy * self.yy,
            yy: other.yx * self.xy + other.yy * self.yy,
            tx: other.xx * self.tx + other.xy * self.ty + other.tx,
            ty: other.yx * self.tx + other.yy * self.ty + other.ty,
        }
    }

    /// Apply `self`, then translate by `(tx, ty)`.
    pub fn then_translate(self, tx: f64, ty: f64) -> Self {
        Self {
            tx: self.tx + tx,
            ty: self.ty + ty,
            ..self
        }
    }

    /// Diagonal scale coefficients `(xx, yy)`.
    pub fn scale_factors(&self) -> (f64, f64) {
        (self.xx, self.yy)
    }

    /// Translation component `(tx, ty)`.
    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    /// Round the translation to whole pixels, leaving the linear part alone.
    pub fn snap_translation(self) -> Self {
        Self {
            tx: round_px(self.tx),
            ty: round_px(self.ty),
            ..self
        }
    }

    /// Map a point.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.xx * x + self.xy * y + self.tx,
            self.yx * x + self.yy * y + self.ty,
        )
    }

    /// Axis-aligned bounds of `rect` after mapping its four corners.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(rect.x, rect.y),
            self.map_point(rect.right(), rect.y),
            self.map_point(rect.x, rect.bottom()),
            self.map_point(rect.right(), rect.bottom()),
        ];
        let (mut x0, mut y0) = corners[0];
        let (mut x1, mut y1) = corners[0];
        for &(x, y) in &corners[1..] {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Whether axis-aligned rects stay axis-aligned rects under this map
    /// (scale plus translate, or a 90° rotation/reflection of one).
    pub fn rect_stays_rect(&self) -> bool {
        let axis_aligned = self.xy == 0.0 && self.yx == 0.0 && self.xx != 0.0 && self.yy != 0.0;
        let swapped = self.xx == 0.0 && self.yy == 0.0 && self.xy != 0.0 && self.yx != 0.0;
        axis_aligned || swapped
    }

    /// The inverse map, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.xx * self.yy - self.xy * self.yx;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let xx = self.yy * inv;
        let yx = -self.yx * inv;
        let xy = -self.xy * inv;
        let yy = self.xx * inv;
        Some(Self {
            xx,
            yx,
            xy,
            yy,
            tx: -(xx * self.tx + xy * self.ty),
            ty: -(yx * self.tx + yy * self.ty),
        })
    }

    /// The transform that maps `src` onto `dst` under `fit`.
    ///
    /// Returns [`IDENTITY`](Self::IDENTITY) when `src` has no area.
    pub fn fit_rect(src: Rect, dst: Rect, fit: ScaleToFit) -> Self {
        if src.is_empty() {
            return Self::IDENTITY;
        }

        let mut sx = dst.width / src.width;
        let mut sy = dst.height / src.height;
        let mut x_larger = false;

        if fit != ScaleToFit::Fill {
            if sx > sy {
                x_larger = true;
                sx = sy;
            } else {
                sy = sx;
            }
        }

        let mut tx = dst.x - src.x * sx;
        let mut ty = dst.y - src.y * sy;

        if matches!(fit, ScaleToFit::Center | ScaleToFit::End) {
            let mut diff = if x_larger {
                dst.width - src.width * sy
            } else {
                dst.height - src.height * sy
            };
            if fit == ScaleToFit::Center {
                diff *= 0.5;
            }
            if x_larger {
                tx += diff;
            } else {
                ty += diff;
            }
        }

        Self::new([sx, 0.0, 0.0, sy, tx, ty])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        assert!(Affine::IDENTITY.is_identity());
        assert!(Affine::default().is_identity());
        assert!(!Affine::translate(1.0, 0.0).is_identity());
    }

    #[test]
    fn then_applies_left_first() {
        // scale 2, then move right 10: (1, 1) → (12, 12)
        let t = Affine::uniform_scale(2.0).then(Affine::translate(10.0, 10.0));
        assert_eq!(t.map_point(1.0, 1.0), (12.0, 12.0));

        // move first, then scale: (1, 1) → (22, 22)
        let t = Affine::translate(10.0, 10.0).then(Affine::uniform_scale(2.0));
        assert_eq!(t.map_point(1.0, 1.0), (22.0, 22.0));
    }

    #[test]
    fn then_translate_matches_then() {
        let a = Affine::new([2.0, 0.5, -1.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            a.then_translate(7.0, -2.0),
            a.then(Affine::translate(7.0, -2.0))
        );
    }

    #[test]
    fn map_rect_bounds_rotation() {
        // 90° rotation: (x, y) → (-y, x)
        let rot = Affine::new([0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
        let r = rot.map_rect(Rect::at_origin(4.0, 2.0));
        assert_eq!(r, Rect::new(-2.0, 0.0, 2.0, 4.0));
        assert!(rot.rect_stays_rect());
    }

    #[test]
    fn shear_does_not_keep_rects() {
        let shear = Affine::new([1.0, 0.0, 0.5, 1.0, 0.0, 0.0]);
        assert!(!shear.rect_stays_rect());
        assert!(!Affine::scale(0.0, 1.0).rect_stays_rect());
    }

    #[test]
    fn inverse_round_trips_point() {
        let a = Affine::new([2.0, 0.0, 0.0, 4.0, 10.0, -6.0]);
        let inv = a.inverse().unwrap();
        let (x, y) = a.map_point(3.0, 5.0);
        assert_eq!(inv.map_point(x, y), (3.0, 5.0));
        assert!(Affine::scale(0.0, 2.0).inverse().is_none());
    }

    #[test]
    fn snap_translation_rounds_half_up() {
        let a = Affine::new([0.5, 0.0, 0.0, 0.5, 2.5, -2.5]).snap_translation();
        assert_eq!(a.translation(), (3.0, -2.0));
        assert_eq!(a.scale_factors(), (0.5, 0.5));
    }

    #[test]
    fn round_px_negative_halves() {
        assert_eq!(round_px(-0.5), 0.0);
        assert_eq!(round_px(-1.5), -1.0);
        assert_eq!(round_px(1.49), 1.0);
    }

    // ── fit_rect ────────────────────────────────────────────────────────

    #[test]
    fn fit_rect_fill_scales_independently() {
        let t = Affine::fit_rect(
            Rect::at_origin(100.0, 50.0),
            Rect::new(10.0, 20.0, 200.0, 200.0),
            ScaleToFit::Fill,
        );
        assert_eq!(t.scale_factors(), (2.0, 4.0));
        assert_eq!(t.translation(), (10.0, 20.0));
    }

    #[test]
    fn fit_rect_start_pins_min_corner() {
        let src = Rect::at_origin(100.0, 50.0);
        let dst = Rect::new(0.0, 0.0, 200.0, 200.0);
        let t = Affine::fit_rect(src, dst, ScaleToFit::Start);
        let placed = t.map_rect(src);
        assert_eq!(placed, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn fit_rect_end_pins_max_corner() {
        let src = Rect::at_origin(100.0, 50.0);
        let dst = Rect::new(0.0, 0.0, 200.0, 200.0);
        let placed = Affine::fit_rect(src, dst, ScaleToFit::End).map_rect(src);
        assert_eq!(placed.bottom(), dst.bottom());
        assert_eq!(placed.right(), dst.right());
        assert_eq!(placed.y, 100.0);
    }

    #[test]
    fn fit_rect_center_splits_slack() {
        // Tall source in wide box: slack is horizontal.
        let src = Rect::at_origin(50.0, 100.0);
        let dst = Rect::new(0.0, 0.0, 300.0, 200.0);
        let placed = Affine::fit_rect(src, dst, ScaleToFit::Center).map_rect(src);
        assert_eq!(placed, Rect::new(100.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn fit_rect_respects_dst_origin() {
        let src = Rect::at_origin(10.0, 10.0);
        let dst = Rect::new(5.0, 7.0, 20.0, 40.0);
        let placed = Affine::fit_rect(src, dst, ScaleToFit::Start).map_rect(src);
        assert_eq!(placed, Rect::new(5.0, 7.0, 20.0, 20.0));
    }

    #[test]
    fn fit_rect_empty_src_is_identity() {
        let t = Affine::fit_rect(
            Rect::at_origin(0.0, 10.0),
            Rect::at_origin(100.0, 100.0),
            ScaleToFit::Center,
        );
        assert!(t.is_identity());
    }
}
