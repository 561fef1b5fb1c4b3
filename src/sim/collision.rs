//! Point-vs-grid collision test.
//!
//! The player is a point; every solid cell is inflated by [`WALL_MARGIN`] on
//! all sides so the eye never gets close enough to a wall face for the
//! projection to blow up.

use glam::Vec2;

use crate::world::{EMPTY, Level};

/// How far (in cells) a wall's bounding box is grown outwards.
pub const WALL_MARGIN: f32 = 0.05;

/// `true` if `pos` lies inside (or exactly on) the inflated box of any solid
/// cell in the 3×3 neighbourhood of the nearest grid corner.
///
/// Cells outside the map count as solid, so the edge of the grid behaves like
/// a wall even when the level image has no border.
pub fn has_collided(level: &Level, pos: Vec2) -> bool {
    // Inside a wall or off the map: no need to look at the neighbours. This
    // also keeps `cx ± 1` in range for far-away points.
    if !pos.is_finite() || level.at_point(pos) != EMPTY {
        return true;
    }
    let cx = pos.x.round() as i32;
    let cy = pos.y.round() as i32;

    for j in cy - 1..=cy + 1 {
        for i in cx - 1..=cx + 1 {
            if !level.is_solid(i, j) {
                continue;
            }
            let min_x = i as f32 - WALL_MARGIN;
            let max_x = (i + 1) as f32 + WALL_MARGIN;
            let min_y = j as f32 - WALL_MARGIN;
            let max_y = (j + 1) as f32 + WALL_MARGIN;
            if pos.x >= min_x && pos.x <= max_x && pos.y >= min_y && pos.y <= max_y {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5×5 room: solid border, empty 3×3 interior.
    fn room() -> Level {
        let mut cells = vec![0u8; 25];
        for y in 0..5 {
            for x in 0..5 {
                if x == 0 || y == 0 || x == 4 || y == 4 {
                    cells[y * 5 + x] = 1;
                }
            }
        }
        Level::new(5, 5, cells).unwrap()
    }

    #[test]
    fn centre_of_empty_room_is_free() {
        assert!(!has_collided(&room(), Vec2::new(2.5, 2.5)));
    }

    #[test]
    fn inflated_boundary_counts_as_hit() {
        let lvl = room();
        // east wall face at x = 4, inflated to 3.95
        assert!(has_collided(&lvl, Vec2::new(4.0 - WALL_MARGIN, 2.5)));
        assert!(!has_collided(&lvl, Vec2::new(3.9, 2.5)));
        // north wall bottom edge at y = 1, inflated to 1.05
        assert!(has_collided(&lvl, Vec2::new(2.5, 1.0 + WALL_MARGIN)));
        assert!(!has_collided(&lvl, Vec2::new(2.5, 1.1)));
    }

    #[test]
    fn inside_a_wall_collides() {
        assert!(has_collided(&room(), Vec2::new(0.5, 2.5)));
    }

    #[test]
    fn outside_the_map_collides() {
        let open = Level::new(3, 3, vec![0; 9]).unwrap();
        assert!(!has_collided(&open, Vec2::new(1.5, 1.5)));
        assert!(has_collided(&open, Vec2::new(2.97, 1.5)));
        assert!(has_collided(&open, Vec2::new(-0.5, 1.5)));
        assert!(has_collided(&open, Vec2::new(f32::NAN, 1.5)));
    }

    #[test]
    fn far_away_points_collide_without_overflow() {
        let open = Level::new(3, 3, vec![0; 9]).unwrap();
        assert!(has_collided(&open, Vec2::new(3.0e9, 1.5)));
        assert!(has_collided(&open, Vec2::new(1.5, -3.0e9)));
        assert!(has_collided(&open, Vec2::new(f32::MAX, f32::MIN)));
    }
}
