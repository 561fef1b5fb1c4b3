// Format-agnostic repository of wall textures decoded by the asset loader.
// The raycaster and renderer only ever see read-only `&Texture`s.

use std::collections::HashMap;

use crate::world::level::{Cell, EMPTY};

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Square texture, 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub size: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Wrap decoded pixels, checking the buffer is `size × size`.
    pub fn new<S: Into<String>>(
        name: S,
        width: usize,
        height: usize,
        pixels: Vec<u32>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if width == 0 || width != height || pixels.len() != width * height {
            return Err(TextureError::NotSquare {
                name,
                width,
                height,
            });
        }
        Ok(Self {
            name,
            size: width,
            pixels,
        })
    }

    /// Texel at column `u`, row `v`; indices past the edge are clamped.
    #[inline]
    pub fn sample(&self, u: usize, v: usize) -> u32 {
        let last = self.size - 1;
        self.pixels[v.min(last) * self.size + u.min(last)]
    }
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: u32 = 0xFF_A0_A0_A0;
        const DARK: u32 = 0xFF_50_50_50;
        let mut pix = vec![0u32; 8 * 8];
        for y in 0..8 {
            for x in 0..8 {
                pix[y * 8 + x] = if (x ^ y) & 1 == 0 { LIGHT } else { DARK };
            }
        }
        Texture {
            name: "CHECKER".to_string(),
            size: 8,
            pixels: pix,
        }
    }
}

/// Things that can go wrong when filling or using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texture `{name}` is {width}x{height}, wall textures must be square")]
    NotSquare {
        name: String,
        width: usize,
        height: usize,
    },

    /// Mixed texture sizes are not supported.
    #[error("texture `{name}` is {got}px, other wall textures are {expected}px")]
    SizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Single owner of every wall texture.
///
/// * ID **0** is always the “missing” checkerboard.
/// * All loaded textures share one size; the checkerboard is exempt.
#[derive(Debug)]
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback under the fixed name `"MISSING"`.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Number of textures stored (including the “missing” one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Edge length shared by all loaded textures, if any were loaded.
    pub fn wall_size(&self) -> Option<usize> {
        self.data.get(1).map(|t| t.size)
    }

    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Texture id for wall material `m`.
    ///
    /// Materials cycle through the loaded textures in load order
    /// (material 1 → first texture); with nothing loaded, or for
    /// [`EMPTY`], the checkerboard is returned.
    pub fn for_material(&self, m: Cell) -> TextureId {
        let loaded = self.data.len() - 1;
        if loaded == 0 || m == EMPTY {
            return NO_TEXTURE;
        }
        ((m as usize - 1) % loaded + 1) as TextureId
    }

    /// Infallible lookup used in the per-column hot path.
    #[inline]
    pub fn material(&self, m: Cell) -> &Texture {
        &self.data[self.for_material(m) as usize]
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails on a duplicate name or a size differing from earlier walls.
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if let Some(expected) = self.wall_size() {
            if tex.size != expected {
                return Err(TextureError::SizeMismatch {
                    name,
                    expected,
                    got: tex.size,
                });
            }
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
