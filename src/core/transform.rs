use crate::animation::easing::EasingFunction;
use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// A 2D view transform: translation offsets plus a uniform scale factor
///
/// Screen position of a world point `p` is `p * k + (x, y)`. Composition
/// follows the zoom-identity convention: `translate` shifts in the already
/// scaled space, so `identity().translate(a, b).scale(k).translate(c, d)`
/// yields `{x: a + k*c, y: b + k*d, k}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl ViewTransform {
    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// Create identity transform (no translation, scale 1)
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Check if this is exactly the identity transform
    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.k == 1.0
    }

    /// Translates by `(tx, ty)` in the scaled space
    pub fn translate(&self, tx: f64, ty: f64) -> Self {
        Self::new(self.x + self.k * tx, self.y + self.k * ty, self.k)
    }

    /// Multiplies the scale factor, keeping the translation fixed
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x, self.y, self.k * s)
    }

    /// Maps a world/projected point to screen coordinates
    pub fn apply_point(&self, point: &Point) -> Point {
        Point::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    /// Maps a screen point back to world/projected coordinates
    pub fn invert_point(&self, point: &Point) -> Point {
        Point::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    /// Computes the transform that centers `bounds` in a viewport and scales
    /// it to fill the tightest axis, shrunk by `margin` and capped at
    /// `max_zoom`
    ///
    /// A bbox that is degenerate on one axis lets the other axis drive the
    /// fit; degenerate on both axes the quotient overflows to infinity and
    /// the cap takes over, so point targets center at `max_zoom`. `f64::min`
    /// returns its non-NaN operand, which keeps the `margin == 1` corner on
    /// the same path.
    pub fn fit(bounds: &Bounds, width: f64, height: f64, margin: f64, max_zoom: f64) -> Self {
        let ratio = (bounds.width() / width).max(bounds.height() / height);
        let k = max_zoom.min((1.0 - margin) / ratio);
        let center = bounds.center();

        Self::identity()
            .translate(width / 2.0, height / 2.0)
            .scale(k)
            .translate(-center.x, -center.y)
    }

    /// Interpolate between two transforms with easing
    pub fn lerp_with_easing(&self, other: &ViewTransform, t: f64, easing: EasingFunction) -> Self {
        let eased_t = easing.apply(t);
        Self::new(
            self.x + (other.x - self.x) * eased_t,
            self.y + (other.y - self.y) * eased_t,
            self.k + (other.k - self.k) * eased_t,
        )
    }

    /// Renders the transform as a CSS/SVG-style string, e.g.
    /// `translate(-140 -240) scale(2.7)`
    pub fn transform_string(&self) -> String {
        format!("translate({} {}) scale({})", self.x, self.y, self.k)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}
