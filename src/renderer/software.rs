//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0xAARRGGBB** format.
//! * Every column is written top to bottom on every frame, so no clear pass
//!   is needed for correctness and no stale pixels survive.
//! ---------------------------------------------------------------------------

use crate::{
    config::Settings,
    engine::raycast::{Axis, RayHit},
    renderer::{Renderer, Rgba},
    world::{Camera, Texture, TextureBank},
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Raycaster column renderer.
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
    ceiling: Rgba,
    floor: Rgba,
    side_shading: bool,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(0xFF_38_38_38, 0xFF_70_70_70, true)
    }
}

impl Software {
    pub fn new(ceiling: Rgba, floor: Rgba, side_shading: bool) -> Self {
        Self {
            scratch: Vec::new(),
            width: 0,
            height: 0,
            ceiling,
            floor,
            side_shading,
        }
    }

    pub fn from_settings(s: &Settings) -> Self {
        Self::new(s.ceiling_color, s.floor_color, s.side_shading)
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(self.ceiling);
    }

    fn draw_column(&mut self, x: usize, hit: Option<&RayHit>, camera: &Camera, bank: &TextureBank) {
        if x >= self.width {
            return;
        }
        let h = self.height;
        let Some(hit) = hit else {
            self.fill_rows(x, 0, h / 2, self.ceiling);
            self.fill_rows(x, h / 2, h, self.floor);
            return;
        };

        let strip = strip_height(h, camera.projection().plane_distance, hit.corrected);
        let top = (h as f32 - strip) * 0.5;
        let y0 = (top.round().max(0.0) as usize).min(h);
        let y1 = ((top + strip).round().max(0.0) as usize).clamp(y0, h);

        self.fill_rows(x, 0, y0, self.ceiling);
        self.draw_strip(x, y0, y1, top, strip, hit, bank.material(hit.material));
        self.fill_rows(x, y1, h, self.floor);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

impl Software {
    fn fill_rows(&mut self, x: usize, from: usize, to: usize, colour: Rgba) {
        for y in from..to {
            self.scratch[y * self.width + x] = colour;
        }
    }

    /// Textured wall slice covering rows `y0..y1` of column `x`.
    ///
    /// `top` / `strip` are the unrounded strip extents, so the texture is
    /// stretched over the exact projected height.
    #[allow(clippy::too_many_arguments)]
    fn draw_strip(
        &mut self,
        x: usize,
        y0: usize,
        y1: usize,
        top: f32,
        strip: f32,
        hit: &RayHit,
        tex: &Texture,
    ) {
        let size = tex.size as f32;
        let u = (hit.face * size) as usize;
        let shade = self.side_shading && hit.axis == Axis::Y;
        let step_v = size / strip.max(f32::EPSILON);

        for y in y0..y1 {
            let v = ((y as f32 - top).max(0.0) * step_v) as usize;
            let texel = tex.sample(u, v);
            self.scratch[y * self.width + x] = if shade { shade_side(texel) } else { texel };
        }
    }
}

/// On-screen height of a wall at view-axis depth `corrected`.
///
/// ```text
/// h = min(viewport_h, viewport_h · plane_distance / corrected)
/// ```
///
/// Zero, negative or NaN depths (eye touching the wall) give the full height.
pub fn strip_height(viewport_h: usize, plane_distance: f32, corrected: f32) -> f32 {
    let vh = viewport_h as f32;
    if corrected.is_nan() || corrected <= 0.0 {
        return vh;
    }
    (vh * plane_distance / corrected).min(vh)
}

/// Halve RGB, keep alpha. Applied to north/south faces.
#[inline]
pub fn shade_side(c: Rgba) -> Rgba {
    (c & 0xFF_00_00_00) | ((c >> 1) & 0x00_7F_7F_7F)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
