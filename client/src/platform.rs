//! Static platform layout.
//!
//! The world is a fixed, ordered list of axis-aligned rectangles. Order
//! matters: landing resolution walks the list front to back and the last
//! match wins.

use glam::Vec2;

use crate::config::{MAP_HEIGHT, MAP_WIDTH};

/// Material shared by every platform of the same kind.
#[derive(Debug, PartialEq)]
pub struct SurfaceType {
    pub name: &'static str,
    pub color: &'static str,
    /// Fraction of horizontal speed kept per landing, in (0, 1].
    pub friction: f32,
    /// Upward velocity applied on landing; negative is up.
    pub bounce: Option<f32>,
}

pub static GRASS: SurfaceType = SurfaceType {
    name: "grass",
    color: "#3a8c3f",
    friction: 0.85,
    bounce: None,
};

pub static STONE: SurfaceType = SurfaceType {
    name: "stone",
    color: "#808080",
    friction: 0.9,
    bounce: None,
};

pub static ICE: SurfaceType = SurfaceType {
    name: "ice",
    color: "#a5f2f3",
    friction: 0.98,
    bounce: None,
};

pub static BOUNCE: SurfaceType = SurfaceType {
    name: "bounce",
    color: "#ff6b6b",
    friction: 0.85,
    bounce: Some(-13.0),
};

#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub surface: &'static SurfaceType,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, surface: &'static SurfaceType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            surface,
        }
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

const H: f32 = MAP_HEIGHT;

pub static WORLD: [Platform; 14] = [
    // Ground
    Platform::new(0.0, H - 100.0, MAP_WIDTH, 100.0, &GRASS),
    // Main platforms
    Platform::new(300.0, H - 200.0, 200.0, 20.0, &GRASS),
    Platform::new(600.0, H - 300.0, 200.0, 20.0, &STONE),
    Platform::new(900.0, H - 400.0, 200.0, 20.0, &ICE),
    Platform::new(1200.0, H - 500.0, 200.0, 20.0, &BOUNCE),
    // Floating islands
    Platform::new(1500.0, H - 400.0, 400.0, 40.0, &GRASS),
    Platform::new(2000.0, H - 600.0, 300.0, 30.0, &STONE),
    Platform::new(2400.0, H - 500.0, 250.0, 25.0, &ICE),
    // Challenge platforms
    Platform::new(2800.0, H - 400.0, 100.0, 20.0, &BOUNCE),
    Platform::new(3000.0, H - 500.0, 100.0, 20.0, &BOUNCE),
    Platform::new(3200.0, H - 600.0, 100.0, 20.0, &BOUNCE),
    // High platforms
    Platform::new(1800.0, H - 800.0, 150.0, 20.0, &STONE),
    Platform::new(2100.0, H - 900.0, 150.0, 20.0, &ICE),
    Platform::new(2400.0, H - 1000.0, 150.0, 20.0, &BOUNCE),
];
