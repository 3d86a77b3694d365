//! Single-vanishing-point perspective projection
//!
//! Maps world coordinates (lateral x, depth) to screen coordinates. This is
//! the OutRun trick, not true 3D: lateral offsets shrink linearly toward the
//! vanishing point as depth grows, and vertical screen position interpolates
//! from the camera baseline up to the horizon. Depth outside
//! `[0, world_depth]` is clamped, never extrapolated, so scale stays within
//! `[perspective_strength, 1.0]`.

use glam::Vec2;

use crate::config::Config;
use crate::lerp;

/// A projected world point plus the scale factor at its depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// A projected draw rectangle for the external renderer
///
/// `x`/`y` is the top-left-style anchor the renderer expects: horizontally
/// centered on the projected position, vertically anchored at the entity's
/// projected depth (not its midpoint).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub scale: f32,
}

/// Stateless world-to-screen projection for one run
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    vanishing_point: Vec2,
    perspective_strength: f32,
    world_depth: f32,
    camera_y_offset: f32,
}

impl PerspectiveCamera {
    pub fn new(config: &Config) -> Self {
        Self {
            vanishing_point: config.vanishing_point,
            perspective_strength: config.perspective_strength,
            world_depth: config.world_depth,
            camera_y_offset: config.camera_y_offset,
        }
    }

    /// Normalized depth in [0, 1]; NaN collapses to the near plane
    #[inline]
    fn depth_ratio(&self, world_depth: f32) -> f32 {
        let ratio = (world_depth / self.world_depth).clamp(0.0, 1.0);
        if ratio.is_nan() { 0.0 } else { ratio }
    }

    /// Scale factor at a depth: 1.0 at the near plane, `perspective_strength`
    /// at the horizon, linear in between
    pub fn perspective_scale(&self, world_depth: f32) -> f32 {
        lerp(1.0, self.perspective_strength, self.depth_ratio(world_depth))
    }

    /// Project a world point
    pub fn world_to_screen(&self, world_x: f32, world_depth: f32) -> ScreenPoint {
        let ratio = self.depth_ratio(world_depth);
        let scale = lerp(1.0, self.perspective_strength, ratio);

        ScreenPoint {
            x: self.vanishing_point.x + world_x * scale,
            y: self.camera_y_offset + ratio * (self.vanishing_point.y - self.camera_y_offset),
            scale,
        }
    }

    /// Project a world rectangle, scaling width and height uniformly
    pub fn world_rect_to_screen(
        &self,
        world_x: f32,
        world_depth: f32,
        world_w: f32,
        world_h: f32,
    ) -> ScreenRect {
        let point = self.world_to_screen(world_x, world_depth);
        let w = world_w * point.scale;
        let h = world_h * point.scale;

        ScreenRect {
            x: point.x - w / 2.0,
            y: point.y,
            w,
            h,
            scale: point.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&Config::default())
    }

    #[test]
    fn test_scale_endpoints() {
        let cam = camera();
        assert!((cam.perspective_scale(0.0) - 1.0).abs() < 1e-6);
        assert!((cam.perspective_scale(1000.0) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_depth_is_clamped_not_extrapolated() {
        let cam = camera();
        assert_eq!(cam.perspective_scale(-500.0), cam.perspective_scale(0.0));
        assert_eq!(cam.perspective_scale(5000.0), cam.perspective_scale(1000.0));
        // NaN collapses to the near plane
        assert_eq!(cam.perspective_scale(f32::NAN), 1.0);
        assert_eq!(cam.perspective_scale(f32::INFINITY), cam.perspective_scale(1000.0));
    }

    #[test]
    fn test_near_plane_projection_is_identity_around_vanishing_x() {
        let cam = camera();
        let point = cam.world_to_screen(-300.0, 0.0);
        assert!((point.x - (640.0 - 300.0)).abs() < 1e-4);
        assert!((point.y - 0.0).abs() < 1e-4);
        assert!((point.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_horizon_converges_to_vanishing_point() {
        let cam = camera();
        let left = cam.world_to_screen(-300.0, 1000.0);
        let right = cam.world_to_screen(300.0, 1000.0);
        // Lateral spread shrinks to perspective_strength of the near spread
        assert!((right.x - left.x - 600.0 * 0.15).abs() < 1e-3);
        assert!((left.y - 680.0).abs() < 1e-4);
    }

    #[test]
    fn test_rect_is_horizontally_centered_and_depth_anchored() {
        let cam = camera();
        let rect = cam.world_rect_to_screen(0.0, 0.0, 40.0, 60.0);
        assert!((rect.x - (640.0 - 20.0)).abs() < 1e-4);
        assert!((rect.y - 0.0).abs() < 1e-4);
        assert!((rect.w - 40.0).abs() < 1e-4);
        assert!((rect.h - 60.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_scale_monotonically_non_increasing(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let cam = camera();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cam.perspective_scale(near) >= cam.perspective_scale(far));
        }

        #[test]
        fn prop_scale_stays_in_range(depth in -2000.0f32..4000.0) {
            let cam = camera();
            let scale = cam.perspective_scale(depth);
            prop_assert!(scale >= 0.15 - 1e-6);
            prop_assert!(scale <= 1.0 + 1e-6);
        }

        #[test]
        fn prop_clamping_is_idempotent(depth in -2000.0f32..4000.0) {
            let cam = camera();
            let clamped = depth.clamp(0.0, 1000.0);
            prop_assert_eq!(cam.perspective_scale(depth), cam.perspective_scale(clamped));
        }

        #[test]
        fn prop_rect_round_trips_through_scale(
            x in -400.0f32..400.0,
            depth in 0.0f32..1000.0,
            w in 1.0f32..300.0,
            h in 1.0f32..300.0,
        ) {
            let cam = camera();
            let rect = cam.world_rect_to_screen(x, depth, w, h);
            prop_assert!(rect.scale > 0.0);
            prop_assert!((rect.w / rect.scale - w).abs() < 1e-3);
            prop_assert!((rect.h / rect.scale - h).abs() < 1e-3);
        }
    }
}
