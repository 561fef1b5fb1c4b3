use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use crate::config::Settings;

/// Projection parameters fixed at construction.
///
/// One ray is cast per viewport column, so `viewport_width` is simply the
/// number of `ray_increment` steps that fit into the field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov: f32,           // radians
    pub ray_increment: f32, // radians between neighbouring columns
    pub viewport_width: usize,
    pub viewport_height: usize,
    pub render_distance: f32, // cells
    pub plane_distance: f32,  // eye → projection plane
}

impl Projection {
    pub fn new(
        fov: f32,
        ray_increment: f32,
        viewport_height: usize,
        render_distance: f32,
        plane_distance: f32,
    ) -> Self {
        // small bias so 60° / 0.1° gives 600 columns, not 599
        let columns = (fov / ray_increment + 1e-4).floor().max(1.0) as usize;
        Self {
            fov,
            ray_increment,
            viewport_width: columns,
            viewport_height: viewport_height.max(1),
            render_distance,
            plane_distance,
        }
    }

    pub fn from_settings(s: &Settings) -> Self {
        Self::new(
            s.field_of_view.to_radians(),
            s.render_ray_increment.to_radians(),
            s.screen_height,
            s.render_distance,
            s.player_distance_to_projection_plane,
        )
    }

    /// Angle of ray `column` relative to the view direction.
    ///
    /// ```text
    /// offset = column * ray_increment - fov / 2
    /// ```
    #[inline]
    pub fn ray_offset(&self, column: usize) -> f32 {
        column as f32 * self.ray_increment - self.fov * 0.5
    }
}

/// Player view-point on the grid.
///
/// * `pos` is in cell units: cell `(i, j)` spans `[i, i+1) × [j, j+1)`.
/// * `angle` is kept in `[0, 2π)`; 0 = +X, growing towards +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2,
    angle: f32,
    proj: Projection,
}

impl Camera {
    pub fn new(pos: Vec2, angle: f32, proj: Projection) -> Self {
        Self {
            pos,
            angle: wrap_angle(angle),
            proj,
        }
    }

    /// Camera at the configured player start.
    pub fn from_settings(s: &Settings) -> Self {
        Self::new(
            Vec2::new(s.player_start_x, s.player_start_y),
            s.player_start_angle,
            Projection::from_settings(s),
        )
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.proj
    }

    #[inline]
    pub fn viewport(&self) -> (usize, usize) {
        (self.proj.viewport_width, self.proj.viewport_height)
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.angle.sin_cos();
        Vec2::new(c, s)
    }

    /// Unit vector 90° clockwise on screen (angle + π/2).
    #[inline(always)]
    pub fn right(&self) -> Vec2 {
        let (s, c) = (self.angle + FRAC_PI_2).sin_cos();
        Vec2::new(c, s)
    }

    /// Absolute world angle of ray `column`.
    #[inline]
    pub fn ray_angle(&self, column: usize) -> f32 {
        self.angle + self.proj.ray_offset(column)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Translate by `forward` units along the view and `side` units to the
    /// right. No clipping happens here.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Rotate by `delta` radians (positive = turn right on screen).
    pub fn turn(&mut self, delta: f32) {
        self.angle = wrap_angle(self.angle + delta);
    }
}

/// Wrap into `[0, 2π)`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let w = a.rem_euclid(TAU);
    // rem_euclid can round tiny negatives up to exactly TAU
    if w >= TAU { 0.0 } else { w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn proj() -> Projection {
        Projection::new(60f32.to_radians(), 0.1f32.to_radians(), 400, 20.0, 1.0)
    }

    #[test]
    fn viewport_width_counts_rays() {
        let p = proj();
        assert_eq!(p.viewport_width, 600);
        assert_eq!(p.viewport_height, 400);
    }

    #[test]
    fn ray_offsets_span_the_fov() {
        let p = proj();
        assert!((p.ray_offset(0) + 30f32.to_radians()).abs() < 1e-6);
        assert!(p.ray_offset(300).abs() < 1e-5);
        assert!(p.ray_offset(599) < 30f32.to_radians());
    }

    #[test]
    fn ray_angle_adds_offset_to_heading() {
        let cam = Camera::new(Vec2::ZERO, 1.0, proj());
        assert!((cam.ray_angle(0) - (1.0 - 30f32.to_radians())).abs() < 1e-6);
        assert!((cam.ray_angle(300) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn angle_wraps_both_ways() {
        let mut cam = Camera::new(Vec2::ZERO, -FRAC_PI_2, proj());
        assert!((cam.angle() - 3.0 * FRAC_PI_2).abs() < 1e-5);
        cam.turn(PI);
        assert!((cam.angle() - FRAC_PI_2).abs() < 1e-5);
        cam.turn(-1e-9 - FRAC_PI_2);
        assert!(cam.angle() >= 0.0 && cam.angle() < TAU);
        assert_eq!(wrap_angle(TAU), 0.0);
        assert_eq!(wrap_angle(f32::NAN), 0.0);
    }

    #[test]
    fn forward_and_right_are_orthonormal() {
        let cam = Camera::new(Vec2::ZERO, 0.3, proj());
        let f = cam.forward();
        let r = cam.right();
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
    }

    #[test]
    fn step_forward_and_strafe() {
        let mut cam = Camera::new(Vec2::new(2.0, 2.0), 0.0, proj());
        cam.step(1.0, 0.0);
        assert!((cam.pos() - Vec2::new(3.0, 2.0)).length() < 1e-5);
        // facing +X, right is +Y
        cam.step(0.0, 0.5);
        assert!((cam.pos() - Vec2::new(3.0, 2.5)).length() < 1e-5);
        cam.step(0.0, -0.5);
        cam.step(-1.0, 0.0);
        assert!((cam.pos() - Vec2::new(2.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn from_settings_converts_degrees() {
        let s = Settings::default();
        let cam = Camera::from_settings(&s);
        assert_eq!(cam.viewport(), (600, s.screen_height));
        assert!((cam.projection().fov - s.field_of_view.to_radians()).abs() < 1e-6);
        assert_eq!(cam.pos(), Vec2::new(1.5, 1.5));
    }
}
