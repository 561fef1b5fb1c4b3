mod collision;
mod frame;
mod input;

pub use collision::{WALL_MARGIN, has_collided};
pub use frame::{FrameState, MAX_FRAME_DELTA, advance};
pub use input::{InputState, Movement, poll};
