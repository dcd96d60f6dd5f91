//! Multiplayer platformer client.
//!
//! Each client simulates its own avatar and mirrors every peer verbatim from
//! the relay's broadcasts.
//!
//! Core modules:
//! - `player` / `collision`: per-frame physics and platform landing
//! - `camera`: smoothed follow camera with look-ahead and shake
//! - `platform`: the fixed world layout
//! - `game`: one session's state and the per-frame driver
//! - `network`: relay protocol and WebSocket link

pub mod camera;
pub mod collision;
pub mod config;
pub mod game;
pub mod input;
pub mod network;
pub mod platform;
pub mod player;

#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use camera::Camera;
pub use game::{ConnectionState, GameState};
pub use player::{Player, RemotePlayer};
