use serde::{Deserialize, Serialize};

/// Wheel delta (in pixels) to zoom exponent; one 500px notch doubles the scale.
const WHEEL_DELTA_FACTOR: f64 = 0.002;

/// Pan/zoom affine state along x: `screen = data_px * k + x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    #[must_use]
    pub const fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.k.is_finite() && self.x.is_finite()
    }

    /// Multiplies the scale factor, keeping the translate.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.k * factor, self.x)
    }

    /// Translates by `tx` in un-zoomed pixel units.
    #[must_use]
    pub fn translate(self, tx: f64) -> Self {
        Self::new(self.k, self.x + self.k * tx)
    }

    #[must_use]
    pub fn apply_x(self, px: f64) -> f64 {
        px * self.k + self.x
    }

    #[must_use]
    pub fn invert_x(self, px: f64) -> f64 {
        (px - self.x) / self.k
    }
}

/// Owner of the current transform plus the limits gestures must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    transform: ZoomTransform,
    enabled: bool,
    min_scale: f64,
    max_scale: f64,
    extent_width: f64,
    extent_height: f64,
}

impl ZoomState {
    #[must_use]
    pub fn new(enabled: bool, min_scale: f64, max_scale: f64) -> Self {
        Self {
            transform: ZoomTransform::IDENTITY,
            enabled,
            min_scale,
            max_scale,
            extent_width: 0.0,
            extent_height: 0.0,
        }
    }

    #[must_use]
    pub fn transform(self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn scale_bounds(self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    #[must_use]
    pub fn extent(self) -> (f64, f64) {
        (self.extent_width, self.extent_height)
    }

    pub fn configure(&mut self, enabled: bool, min_scale: f64, max_scale: f64) {
        self.enabled = enabled;
        self.min_scale = min_scale;
        self.max_scale = max_scale;
    }

    /// Gesture area, `[0, 0] × [width, height]` of the plot.
    pub fn set_extent(&mut self, width: f64, height: f64) {
        self.extent_width = width;
        self.extent_height = height;
    }

    #[must_use]
    pub fn accepts(self, transform: ZoomTransform) -> bool {
        transform.is_finite()
            && transform.k > 0.0
            && transform.k >= self.min_scale
            && transform.k <= self.max_scale
    }

    #[must_use]
    pub fn clamp_scale(self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }

    /// Keeps zoomed content covering the gesture area: it cannot be dragged
    /// past either plot edge, and content narrower than the area is centered.
    #[must_use]
    pub fn constrain(self, transform: ZoomTransform) -> ZoomTransform {
        let width = self.extent_width;
        let dx0 = transform.invert_x(0.0);
        let dx1 = transform.invert_x(width) - width;
        let shift = if dx1 > dx0 {
            (dx0 + dx1) / 2.0
        } else {
            let towards_left = dx0.min(0.0);
            if towards_left != 0.0 {
                towards_left
            } else {
                dx1.max(0.0)
            }
        };
        transform.translate(shift)
    }

    pub fn set_transform(&mut self, transform: ZoomTransform) {
        self.transform = transform;
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
    }

    /// Candidate transform for a wheel step anchored at `anchor_px`.
    #[must_use]
    pub fn wheel_target(self, delta_y: f64, anchor_px: f64) -> ZoomTransform {
        let current = self.transform;
        let k = self.clamp_scale(current.k * 2_f64.powf(-delta_y * WHEEL_DELTA_FACTOR));
        let anchor_data = current.invert_x(anchor_px);
        ZoomTransform::new(k, anchor_px - anchor_data * k)
    }

    /// Candidate transform for a drag by `dx` screen pixels.
    #[must_use]
    pub fn drag_target(self, dx: f64) -> ZoomTransform {
        ZoomTransform::new(self.transform.k, self.transform.x + dx)
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomState, ZoomTransform};

    fn state() -> ZoomState {
        let mut state = ZoomState::new(true, 1.0, 10.0);
        state.set_extent(100.0, 50.0);
        state
    }

    #[test]
    fn translate_is_scaled_by_current_factor() {
        let transform = ZoomTransform::IDENTITY.scale(4.0).translate(-10.0);
        assert_eq!(transform, ZoomTransform::new(4.0, -40.0));
        assert_eq!(transform.invert_x(transform.apply_x(12.5)), 12.5);
    }

    #[test]
    fn constrain_keeps_content_inside_extent() {
        let state = state();
        assert_eq!(
            state.constrain(ZoomTransform::new(2.0, 10.0)),
            ZoomTransform::new(2.0, 0.0)
        );
        assert_eq!(
            state.constrain(ZoomTransform::new(2.0, -150.0)),
            ZoomTransform::new(2.0, -100.0)
        );
        assert_eq!(
            state.constrain(ZoomTransform::new(2.0, -40.0)),
            ZoomTransform::new(2.0, -40.0)
        );
    }

    #[test]
    fn wheel_target_keeps_anchor_fixed_and_clamps_scale() {
        let state = state();
        let target = state.wheel_target(-500.0, 25.0);
        assert!((target.k - 2.0).abs() <= 1e-12);
        assert!((target.apply_x(25.0) - 25.0).abs() <= 1e-9);

        let clamped = state.wheel_target(5_000.0, 25.0);
        assert_eq!(clamped.k, 1.0);
    }

    #[test]
    fn accepts_only_scale_factors_within_bounds() {
        let state = state();
        assert!(state.accepts(ZoomTransform::new(1.0, 0.0)));
        assert!(state.accepts(ZoomTransform::new(10.0, -3.0)));
        assert!(!state.accepts(ZoomTransform::new(0.5, 0.0)));
        assert!(!state.accepts(ZoomTransform::new(10.5, 0.0)));
        assert!(!state.accepts(ZoomTransform::new(f64::NAN, 0.0)));
    }
}
