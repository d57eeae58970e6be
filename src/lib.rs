//! Chicken Invaders: a deterministic single-screen arcade shooter engine.
//!
//! - `geometry`: vectors, positions and proximity collision
//! - `entities`: ship, enemies, shots, bonus target and the game state
//! - `config`: tunable game configuration (JSON loadable)
//! - `compute`: spawning and the per-frame `tick`
//! - `render`: turns a state into a list of draw commands

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
