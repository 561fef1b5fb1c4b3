//! Keyboard and mouse sampling from a minifb window.

use bitflags::bitflags;
use minifb::{Key, MouseMode, Window};

bitflags! {
    /// Movement keys held down this frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Movement: u8 {
        const FORWARD = 0b0001;
        const BACK    = 0b0010;
        const LEFT    = 0b0100; // strafe
        const RIGHT   = 0b1000; // strafe
    }
}

/// One frame's worth of input, sampled by the window layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub moves: Movement,
    pub mouse_dx: f32, // pixels since last frame, + = right
    pub turn: f32,     // keyboard turn –1 … +1, + = right
    pub quit: bool,
}

impl InputState {
    /// Net (forward, side) direction; opposite keys cancel out.
    pub fn axes(&self) -> (f32, f32) {
        let axis = |pos: Movement, neg: Movement| -> f32 {
            self.moves.contains(pos) as i8 as f32 - self.moves.contains(neg) as i8 as f32
        };
        (
            axis(Movement::FORWARD, Movement::BACK),
            axis(Movement::RIGHT, Movement::LEFT),
        )
    }
}

/// Sample keyboard and mouse from `win`.
///
/// * W/S or ↑/↓ move, A/D strafe, ←/→ turn, Escape or closing the window quits.
/// * `last_mouse` carries the cursor position between frames; the first
///   frame (or a cursor outside the window) yields no rotation.
pub fn poll(win: &Window, last_mouse: &mut Option<(f32, f32)>) -> InputState {
    let down = |keys: &[Key]| keys.iter().any(|&k| win.is_key_down(k));

    let mut moves = Movement::empty();
    moves.set(Movement::FORWARD, down(&[Key::W, Key::Up]));
    moves.set(Movement::BACK, down(&[Key::S, Key::Down]));
    moves.set(Movement::LEFT, down(&[Key::A]));
    moves.set(Movement::RIGHT, down(&[Key::D]));

    let turn = down(&[Key::Right]) as i8 as f32 - down(&[Key::Left]) as i8 as f32;

    let pos = win.get_mouse_pos(MouseMode::Discard);
    let mouse_dx = match (pos, *last_mouse) {
        (Some((x, _)), Some((prev, _))) => x - prev,
        _ => 0.0,
    };
    *last_mouse = pos;

    InputState {
        moves,
        mouse_dx,
        turn,
        quit: !win.is_open() || win.is_key_down(Key::Escape),
    }
}
