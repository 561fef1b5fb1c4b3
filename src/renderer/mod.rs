//! Rendering abstraction layer.
//!
//! The engine never touches a pixel buffer directly. It casts one ray per
//! viewport column and hands each [`RayHit`] to a type implementing
//! [`Renderer`], which owns the frame-buffer for the duration of the frame.
//!
//! * [`RendererExt::draw_frame`] is the whole per-frame pass:
//!   `begin_frame` → one `draw_column` per ray → `end_frame`.
//! * `end_frame` *loans* the finished buffer to the presentation layer; no
//!   ownership ever leaves the renderer.

use crate::{
    engine::raycast::{RayHit, cast},
    world::{Camera, Level, TextureBank},
};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

pub const ARGB_BLACK: Rgba = 0xFF_00_00_00;
pub const ARGB_WHITE: Rgba = 0xFF_FF_FF_FF;
pub const ARGB_RED: Rgba = 0xFF_FF_00_00;
pub const ARGB_GREEN: Rgba = 0xFF_00_FF_00;
pub const ARGB_BLUE: Rgba = 0xFF_00_00_FF;

/// A renderer that owns an internal scratch buffer for the whole frame.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill screen column `x` completely: ceiling, wall strip, floor.
    ///
    /// `hit == None` means the ray found nothing and the column is drawn as
    /// ceiling over floor only.
    fn draw_column(&mut self, x: usize, hit: Option<&RayHit>, camera: &Camera, bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Software caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with the one-liner `draw_frame` pass.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(&mut self, camera: &Camera, level: &Level, bank: &TextureBank, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        let (width, height) = camera.viewport();
        self.begin_frame(width, height);
        for x in 0..width {
            let hit = cast(level, camera, x);
            self.draw_column(x, hit.as_ref(), camera, bank);
        }
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;

pub use software::{Software, shade_side, strip_height};
