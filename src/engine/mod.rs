pub mod raycast;

use crate::{
    config::Settings,
    renderer::{Renderer, RendererExt, Rgba},
    sim::{self, FrameState, InputState},
    world::{Camera, Level, TextureBank},
};

pub use raycast::{Axis, RayHit, cast, cast_ray};

/// Owns everything a frame needs; the binary only feeds input and presents.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub level: Level,
    pub camera: Camera,
    pub texture_bank: TextureBank,
    settings: Settings,
    rendered_once: bool,
}

impl<R: Renderer> Engine<R> {
    pub fn new(
        renderer: R,
        level: Level,
        camera: Camera,
        texture_bank: TextureBank,
        settings: Settings,
    ) -> Self {
        Self {
            renderer,
            level,
            camera,
            texture_bank,
            settings,
            rendered_once: false,
        }
    }

    /// Apply one frame of input. The very first frame always reports a
    /// change so something is on screen before the player moves.
    pub fn update(&mut self, input: &InputState, dt: f32) -> FrameState {
        let mut state = sim::advance(&mut self.camera, &self.level, input, dt, &self.settings);
        state.changed |= !self.rendered_once;
        state
    }

    /// Raycast every column, composite, and loan the buffer to `submit`.
    pub fn render_frame(&mut self, submit: impl FnOnce(&[Rgba], usize, usize)) {
        self.renderer
            .draw_frame(&self.camera, &self.level, &self.texture_bank, submit);
        self.rendered_once = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{renderer::Software, sim::Movement};
    use glam::Vec2;

    fn engine() -> Engine<Software> {
        let mut cells = vec![0u8; 25];
        for y in 0..5 {
            for x in 0..5 {
                if x == 0 || y == 0 || x == 4 || y == 4 {
                    cells[y * 5 + x] = 1;
                }
            }
        }
        let settings = Settings {
            screen_height: 30,
            field_of_view: 60.0,
            render_ray_increment: 1.0,
            player_start_x: 2.5,
            player_start_y: 2.5,
            speed_modifier: 1.0,
            ..Settings::default()
        };
        Engine::new(
            Software::from_settings(&settings),
            Level::new(5, 5, cells).unwrap(),
            Camera::from_settings(&settings),
            TextureBank::default_with_checker(),
            settings,
        )
    }

    fn grab(engine: &mut Engine<Software>) -> Vec<Rgba> {
        let mut out = Vec::new();
        engine.render_frame(|fb, _, _| out = fb.to_vec());
        out
    }

    #[test]
    fn first_frame_always_renders() {
        let mut e = engine();
        assert!(e.update(&InputState::default(), 0.016).changed);
        let _ = grab(&mut e);
        assert!(!e.update(&InputState::default(), 0.016).changed);
    }

    #[test]
    fn frame_buffer_matches_viewport() {
        let mut e = engine();
        let mut dims = (0, 0, 0);
        e.render_frame(|fb, w, h| dims = (fb.len(), w, h));
        assert_eq!(dims, (60 * 30, 60, 30));
    }

    #[test]
    fn walking_into_wall_keeps_position_and_frame() {
        let mut e = engine();
        e.camera.set_pos(Vec2::new(3.9, 2.5));
        let before = grab(&mut e);

        let push = InputState {
            moves: Movement::FORWARD,
            ..Default::default()
        };
        let state = e.update(&push, 0.1);
        assert!(!state.changed);
        assert_eq!(e.camera.pos(), Vec2::new(3.9, 2.5));
        assert_eq!(grab(&mut e), before);
    }

    #[test]
    fn moving_changes_the_frame() {
        let mut e = engine();
        let before = grab(&mut e);
        let step = InputState {
            moves: Movement::BACK,
            ..Default::default()
        };
        assert!(e.update(&step, 0.1).changed);
        assert_ne!(grab(&mut e), before);
    }
}
