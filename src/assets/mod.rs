//! Image files → [`Level`](crate::world::Level) / [`TextureBank`](crate::world::TextureBank).
//!
//! Only this module knows about the `image` crate; everything downstream
//! works on plain cell values and ARGB texels.

mod loader;

pub use loader::{AssetError, load_level, load_textures, resolve};
