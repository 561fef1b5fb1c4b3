//! Per-frame camera update: rotate, move, then collide.

use crate::{
    config::Settings,
    sim::{collision::has_collided, input::InputState},
    world::{Camera, Level},
};

/// Longest frame delta we integrate; a stall must not tunnel through walls.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Whether the camera moved this frame and the view must be redrawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameState {
    pub changed: bool,
}

/// Apply one frame of input to `camera`.
///
/// A move that ends inside an inflated wall box is thrown away entirely and
/// the previous position is restored bit-for-bit; there is no sliding along
/// the free axis. Rotation is never blocked.
///
/// `changed` is raised by the steps that actually modified the camera, so an
/// idle frame (or a fully rejected move) reports `false` without comparing
/// floats.
pub fn advance(
    camera: &mut Camera,
    level: &Level,
    input: &InputState,
    dt: f32,
    settings: &Settings,
) -> FrameState {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DELTA)
    } else {
        0.0
    };
    let mut changed = false;

    let delta_angle =
        (input.mouse_dx * settings.rotation_modifier + input.turn * settings.key_turn_speed) * dt;
    if delta_angle != 0.0 && delta_angle.is_finite() {
        camera.turn(delta_angle);
        changed = true;
    }

    let (forward, side) = input.axes();
    let dist = settings.speed_modifier * dt;
    if (forward != 0.0 || side != 0.0) && dist > 0.0 {
        let before = camera.pos();
        camera.step(forward * dist, side * dist);
        if has_collided(level, camera.pos()) {
            camera.set_pos(before);
        } else {
            changed = true;
        }
    }

    FrameState { changed }
}
