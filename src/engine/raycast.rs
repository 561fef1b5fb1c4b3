//! Grid ray marching (DDA).
//!
//! A ray walks from cell boundary to cell boundary, always taking whichever
//! of the next vertical (`x = k`) or horizontal (`y = k`) grid line is closer,
//! until it enters a solid cell or runs past the render distance.
//!
//! ```text
//!   delta.x = 1 / |dir.x|      distance between two vertical lines
//!   delta.y = 1 / |dir.y|      distance between two horizontal lines
//! ```

use glam::Vec2;

use crate::world::{Camera, Cell, EMPTY, Level};

/// Direction components smaller than this are treated as this, so a ray
/// parallel to an axis never divides by zero.
const MIN_DIR: f32 = 1e-6;

/// Which family of grid lines the ray crossed to enter the hit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// A vertical line `x = k` (east / west face).
    X,
    /// A horizontal line `y = k` (north / south face).
    Y,
}

/// First solid cell met by one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Euclidean distance from the eye to the hit point.
    pub distance: f32,
    /// `distance · cos(offset)`: depth along the view axis, drives strip height.
    pub corrected: f32,
    pub cell: (i32, i32),
    pub material: Cell,
    /// Where on the face the ray landed, in `[0, 1)`.
    pub face: f32,
    pub axis: Axis,
    pub point: Vec2,
}

/// Cast the ray for viewport column `column`.
///
/// Returns `None` when nothing solid lies within the render distance.
pub fn cast(level: &Level, camera: &Camera, column: usize) -> Option<RayHit> {
    let proj = camera.projection();
    let offset = proj.ray_offset(column);
    cast_ray(
        level,
        camera.pos(),
        camera.ray_angle(column),
        offset,
        proj.render_distance,
    )
}

/// Cast a single ray from `origin` at world angle `angle`.
///
/// `offset` is the ray's angle relative to the view direction and is only
/// used for the fisheye correction.
pub fn cast_ray(
    level: &Level,
    origin: Vec2,
    angle: f32,
    offset: f32,
    max_distance: f32,
) -> Option<RayHit> {
    if !origin.is_finite() || !angle.is_finite() {
        return None;
    }
    let (sin, cos) = angle.sin_cos();
    let dir = Vec2::new(cos, sin);
    let correction = offset.cos();

    let mut cx = origin.x.floor() as i32;
    let mut cy = origin.y.floor() as i32;

    // Eye already inside a wall: report it at zero distance.
    if level.is_solid(cx, cy) {
        let axis = nearest_axis(origin);
        return Some(RayHit {
            distance: 0.0,
            corrected: 0.0,
            cell: (cx, cy),
            material: level.get(cx, cy),
            face: face_fraction(origin, axis),
            axis,
            point: origin,
        });
    }

    let delta_x = 1.0 / dir.x.abs().max(MIN_DIR);
    let delta_y = 1.0 / dir.y.abs().max(MIN_DIR);

    let (step_x, mut side_x) = if dir.x < 0.0 {
        (-1, (origin.x - cx as f32) * delta_x)
    } else {
        (1, (cx as f32 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if dir.y < 0.0 {
        (-1, (origin.y - cy as f32) * delta_y)
    } else {
        (1, (cy as f32 + 1.0 - origin.y) * delta_y)
    };

    // Out-of-bounds cells are solid, so the walk ends at the map edge at the
    // latest even if `max_distance` is huge.
    loop {
        let (distance, axis) = if side_x < side_y {
            let d = side_x;
            side_x += delta_x;
            cx += step_x;
            (d, Axis::X)
        } else {
            let d = side_y;
            side_y += delta_y;
            cy += step_y;
            (d, Axis::Y)
        };

        if !(distance <= max_distance) {
            return None;
        }

        let material = level.get(cx, cy);
        if material != EMPTY {
            let point = origin + dir * distance;
            return Some(RayHit {
                distance,
                corrected: distance * correction,
                cell: (cx, cy),
                material,
                face: face_fraction(point, axis),
                axis,
                point,
            });
        }
    }
}

/// Axis whose coordinate sits closest to an integer grid line.
///
/// Used when the crossing is not known from the walk itself.
pub fn nearest_axis(p: Vec2) -> Axis {
    let gap = |v: f32| {
        let f = v - v.floor();
        f.min(1.0 - f)
    };
    if gap(p.x) <= gap(p.y) { Axis::X } else { Axis::Y }
}

/// Fractional position along the face: the coordinate *not* fixed by the
/// crossed grid line, reduced to `[0, 1)`.
pub fn face_fraction(p: Vec2, crossed: Axis) -> f32 {
    let v = match crossed {
        Axis::X => p.y,
        Axis::Y => p.x,
    };
    let f = v - v.floor();
    if (0.0..1.0).contains(&f) { f } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Projection;
    use std::f32::consts::{FRAC_PI_2, PI};

    /// 5×5 room: solid border, empty 3×3 interior.
    fn room() -> Level {
        let mut cells = vec![0u8; 25];
        for y in 0..5 {
            for x in 0..5 {
                if x == 0 || y == 0 || x == 4 || y == 4 {
                    cells[y * 5 + x] = 1 + (x == 4) as u8;
                }
            }
        }
        Level::new(5, 5, cells).unwrap()
    }

    #[test]
    fn straight_ray_hits_east_wall() {
        // single-column camera: fov = increment, column 0 offset = 0 when fov→0
        let cam = Camera::new(
            Vec2::new(2.5, 2.3),
            0.0,
            Projection::new(1e-6, 1e-6, 10, 20.0, 1.0),
        );
        assert_eq!(cam.projection().viewport_width, 1);
        let hit = cast(&room(), &cam, 0).expect("east wall");
        assert_eq!(hit.cell, (4, 2));
        assert_eq!(hit.material, 2);
        assert_eq!(hit.axis, Axis::X);
        assert!((hit.distance - 1.5).abs() < 1e-5);
        assert!((hit.corrected - 1.5).abs() < 1e-5);
        assert!((hit.face - 0.3).abs() < 1e-4, "face {}", hit.face);
    }

    #[test]
    fn perpendicular_wall_needs_no_correction() {
        let lvl = room();
        let origin = Vec2::new(2.5, 2.5);
        for angle in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            let hit = cast_ray(&lvl, origin, angle, 0.0, 20.0).unwrap();
            assert!((hit.distance - 1.5).abs() < 1e-5, "angle {angle}");
            assert_eq!(hit.corrected, hit.distance);
        }
    }

    #[test]
    fn fisheye_correction_scales_by_cosine() {
        let lvl = room();
        let offset = 0.4f32;
        let hit = cast_ray(&lvl, Vec2::new(2.5, 2.5), offset, offset, 20.0).unwrap();
        assert!((hit.corrected - hit.distance * offset.cos()).abs() < 1e-6);
        // east wall is 1.5 ahead along the view axis
        assert!((hit.corrected - 1.5).abs() < 1e-4);
    }

    #[test]
    fn beyond_render_distance_is_no_hit() {
        let lvl = room();
        assert!(cast_ray(&lvl, Vec2::new(2.5, 2.5), 0.0, 0.0, 1.4).is_none());
        assert!(cast_ray(&lvl, Vec2::new(2.5, 2.5), 0.0, 0.0, 1.5).is_some());
    }

    #[test]
    fn open_map_edge_stops_the_ray() {
        let open = Level::new(4, 1, vec![0; 4]).unwrap();
        let hit = cast_ray(&open, Vec2::new(0.5, 0.5), 0.0, 0.0, 1000.0).unwrap();
        assert_eq!(hit.cell, (4, 0));
        assert_eq!(hit.material, crate::world::BOUNDARY);
        assert!((hit.distance - 3.5).abs() < 1e-5);
    }

    #[test]
    fn face_fraction_stays_in_unit_range() {
        let lvl = room();
        // grid-aligned origins and axis-parallel rays
        for (x, y) in [(1.0, 1.0), (2.0, 3.0), (3.0, 2.5), (1.5, 3.0)] {
            for k in 0..64 {
                let angle = k as f32 * PI / 32.0;
                if let Some(hit) = cast_ray(&lvl, Vec2::new(x, y), angle, 0.0, 20.0) {
                    assert!(
                        (0.0..1.0).contains(&hit.face),
                        "face {} at ({x},{y}) angle {angle}",
                        hit.face
                    );
                    assert!(hit.distance.is_finite());
                }
            }
        }
        assert_eq!(face_fraction(Vec2::new(3.0, 2.0), Axis::X), 0.0);
        assert_eq!(face_fraction(Vec2::new(-0.25, 0.0), Axis::Y), 0.75);
    }

    #[test]
    fn eye_inside_wall_reports_zero_distance() {
        let hit = cast_ray(&room(), Vec2::new(0.5, 0.02), 1.0, 0.0, 20.0).unwrap();
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.axis, Axis::Y);
        assert!((hit.face - 0.5).abs() < 1e-6);
    }

    #[test]
    fn non_finite_input_is_no_hit() {
        assert!(cast_ray(&room(), Vec2::new(f32::NAN, 2.0), 0.0, 0.0, 5.0).is_none());
    }
}
