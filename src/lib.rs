//! First-person raycasting renderer over a 2-D grid level.
//!
//! * [`world`] – level grid, camera, texture bank.
//! * [`sim`] – input snapshot, collision, per-frame camera update.
//! * [`engine`] – per-column ray marching and frame orchestration.
//! * [`renderer`] – projection of ray hits into an ARGB frame-buffer.
//! * [`assets`] – image decoding for levels and textures.

pub mod assets;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
