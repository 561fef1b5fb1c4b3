mod camera;
mod level;
mod texture;

pub use camera::{Camera, Projection, wrap_angle};
pub use level::{BOUNDARY, Cell, EMPTY, Level, LevelError};
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
