use std::collections::HashSet;
use winit::keyboard::KeyCode;

use crate::config::{ACCELERATION, MAX_SPEED};
use crate::player::{Facing, Player};

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::ArrowUp];

pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    jump_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            jump_requested: false,
        }
    }

    /// Jump fires on the press edge only; key repeat while held is ignored.
    pub fn handle_key_press(&mut self, key: KeyCode) {
        if self.pressed_keys.insert(key) && JUMP_KEYS.contains(&key) {
            self.jump_requested = true;
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn left(&self) -> bool {
        LEFT_KEYS.iter().any(|k| self.is_pressed(*k))
    }

    pub fn right(&self) -> bool {
        RIGHT_KEYS.iter().any(|k| self.is_pressed(*k))
    }

    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Accelerate `player` along the held direction keys. Returns true when
    /// any horizontal key is held, which suppresses deceleration.
    pub fn steer(&self, player: &mut Player) -> bool {
        let (left, right) = (self.left(), self.right());
        if left {
            player.facing = Facing::Left;
            player.velocity.x = (player.velocity.x - ACCELERATION).max(-MAX_SPEED);
        }
        if right {
            player.facing = Facing::Right;
            player.velocity.x = (player.velocity.x + ACCELERATION).min(MAX_SPEED);
        }
        left || right
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
        self.jump_requested = false;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
