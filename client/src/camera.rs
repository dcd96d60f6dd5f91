//! Side-scrolling follow camera.
//!
//! The camera offset is the translation applied to world coordinates before
//! drawing, so it is the negative of the visible world region's top-left.
//! It eases toward a look-ahead target, shakes on impacts and never reveals
//! anything outside the map.

use glam::Vec2;
use rand::Rng;

use crate::config::*;
use crate::player::Player;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Current render offset.
    pub offset: Vec2,
    /// Offset the camera is easing toward.
    pub target: Vec2,
    /// Shake amplitude; decays every frame.
    pub shake: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    map_size: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self::with_map_size(viewport, Vec2::new(MAP_WIDTH, MAP_HEIGHT))
    }

    pub fn with_map_size(viewport: Vec2, map_size: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            target: Vec2::ZERO,
            shake: 0.0,
            viewport,
            map_size,
        }
    }

    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Start a shake impulse of the given magnitude.
    pub fn shake(&mut self, magnitude: f32) {
        self.shake = magnitude;
    }

    /// Ease toward `player` once per frame.
    pub fn follow<R: Rng + ?Sized>(&mut self, player: &Player, rng: &mut R) {
        let lookahead = player.velocity * Vec2::new(LOOKAHEAD_X, LOOKAHEAD_Y);
        self.target = -player.position
            + Vec2::new(self.viewport.x / 3.0, self.viewport.y / 2.0)
            + lookahead;

        // Catch up faster when far behind, capped to avoid overshoot
        let delta = self.target - self.offset;
        let speed =
            (CAMERA_SMOOTHNESS * (1.0 + delta.length() / CAMERA_DISTANCE_SCALE)).min(CAMERA_MAX_SPEED);
        self.offset += delta * speed;

        if self.shake > 0.0 {
            let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
            self.offset += jitter * self.shake;
            self.shake *= SHAKE_DECAY;
        }

        self.offset = self.clamp(self.offset);
    }

    fn clamp(&self, offset: Vec2) -> Vec2 {
        let min = -(self.map_size - self.viewport).max(Vec2::ZERO);
        offset.clamp(min, Vec2::ZERO)
    }

    /// World-space rectangle currently on screen, as (top-left, bottom-right).
    pub fn visible_world(&self) -> (Vec2, Vec2) {
        let top_left = -self.offset;
        (top_left, top_left + self.viewport)
    }

}
