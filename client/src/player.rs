use glam::Vec2;
use rand::Rng;

use crate::collision::{Landing, resolve_landing};
use crate::config::*;
use crate::network::PlayerState;
use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The locally simulated avatar.
///
/// `position` is the top-left corner of the square enclosing the circle.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub airborne: bool,
    pub can_double_jump: bool,
    pub facing: Facing,
    pub color: String,
}

impl Player {
    pub fn new(position: Vec2, color: String) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            airborne: false,
            can_double_jump: true,
            facing: Facing::Right,
            color,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Drop a new player at a random x along the top of the map.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.random_range(0.0..MAP_WIDTH - PLAYER_RADIUS * 2.0);
        Self::new(Vec2::new(x, 0.0), random_color(rng))
    }

    /// Advance one frame. `steering` is true when a horizontal key is held.
    pub fn advance(&mut self, steering: bool, platforms: &[Platform]) -> Option<Landing> {
        self.velocity.y = (self.velocity.y + GRAVITY).min(MAX_FALL_SPEED);

        if !steering {
            self.velocity.x *= DECELERATION;
        }
        if self.velocity.x.abs() < MIN_SPEED {
            self.velocity.x = 0.0;
        }

        self.position += self.velocity;

        let landing = resolve_landing(self, platforms);
        self.clamp_to_map();
        landing
    }

    /// Jump from the ground, or double jump once while airborne.
    /// Returns false when no jump was available.
    pub fn jump(&mut self) -> bool {
        if !self.airborne {
            self.velocity.y = JUMP_FORCE;
            self.airborne = true;
            true
        } else if self.can_double_jump {
            self.velocity.y = DOUBLE_JUMP_FORCE;
            self.can_double_jump = false;
            true
        } else {
            false
        }
    }

    fn clamp_to_map(&mut self) {
        let diameter = self.radius * 2.0;
        let max_x = MAP_WIDTH - diameter;
        let max_y = MAP_HEIGHT - diameter;

        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = 0.0;
        } else if self.position.x > max_x {
            self.position.x = max_x;
            self.velocity.x = 0.0;
        }

        if self.position.y > max_y {
            self.position.y = max_y;
            self.velocity.y = 0.0;
            self.airborne = false;
            self.can_double_jump = true;
        } else if self.position.y < 0.0 {
            self.position.y = 0.0;
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            x: self.position.x,
            y: self.position.y,
            color_tag: self.color.clone(),
        }
    }
}

/// A peer's avatar, mirrored verbatim from the last relay broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlayer {
    pub position: Vec2,
    pub color: String,
}

impl RemotePlayer {
    pub fn from_state(state: &PlayerState) -> Self {
        Self {
            position: Vec2::new(state.x, state.y),
            color: state.color_tag.clone(),
        }
    }

    pub fn apply(&mut self, state: &PlayerState) {
        self.position = Vec2::new(state.x, state.y);
        if self.color != state.color_tag {
            self.color.clone_from(&state.color_tag);
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(PLAYER_RADIUS)
    }
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..0x100_0000u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{BOUNCE, GRASS, WORLD};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), "#fff".to_string())
    }

    #[test]
    fn test_gravity_is_capped() {
        let mut player = player_at(100.0, 0.0);
        player.velocity.y = MAX_FALL_SPEED;

        player.advance(false, &[]);

        assert_eq!(player.velocity.y, MAX_FALL_SPEED);
        assert_eq!(player.position.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_deceleration_is_geometric_then_snaps() {
        let mut player = player_at(100.0, 100.0);
        player.velocity.x = 4.0;

        let mut expected = 4.0f32;
        let mut ticks = 0;
        while player.velocity.x != 0.0 {
            player.advance(false, &[]);
            expected *= DECELERATION;
            ticks += 1;
            if expected.abs() < MIN_SPEED {
                assert_eq!(player.velocity.x, 0.0);
            } else {
                assert!((player.velocity.x - expected).abs() < 1e-4);
            }
            assert!(ticks < 100);
        }
        // 4 * 0.9^35 ~= 0.100, 4 * 0.9^36 ~= 0.090
        assert_eq!(ticks, 36);
    }

    #[test]
    fn test_steering_skips_deceleration() {
        let mut player = player_at(100.0, 100.0);
        player.velocity.x = 4.0;

        player.advance(true, &[]);

        assert_eq!(player.velocity.x, 4.0);
        assert_eq!(player.position.x, 104.0);
    }

    #[test]
    fn test_jump_then_double_jump_once() {
        let mut player = player_at(100.0, 100.0);

        assert!(player.jump());
        assert_eq!(player.velocity.y, JUMP_FORCE);
        assert!(player.airborne);
        assert!(player.can_double_jump);

        player.advance(false, &[]);
        assert!(player.jump());
        assert_eq!(player.velocity.y, DOUBLE_JUMP_FORCE);
        assert!(!player.can_double_jump);

        player.advance(false, &[]);
        let vy = player.velocity.y;
        assert!(!player.jump());
        assert_eq!(player.velocity.y, vy);
        assert!(!player.can_double_jump);
    }

    #[test]
    fn test_landing_restores_double_jump() {
        let platform = Platform::new(0.0, 200.0, 400.0, 20.0, &GRASS);
        let mut player = player_at(100.0, 150.0);
        player.jump();
        player.jump();
        assert!(!player.can_double_jump);

        for _ in 0..200 {
            player.advance(false, &[platform]);
            if !player.airborne {
                break;
            }
        }

        assert!(!player.airborne);
        assert!(player.can_double_jump);
        assert_eq!(player.position.y, 160.0);
    }

    #[test]
    fn test_lands_on_platform_scenario() {
        let platform = Platform::new(50.0, 520.0, 200.0, 20.0, &GRASS);
        let mut player = player_at(100.0, 500.0).with_radius(10.0);
        player.velocity.y = 2.0;
        player.airborne = true;

        let landing = player.advance(false, &[platform]);

        assert_eq!(landing, Some(Landing::Rest));
        assert_eq!(player.position.y, 520.0 - 2.0 * player.radius);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.airborne);
    }

    #[test]
    fn test_bounce_pad_reports_bounce() {
        let platform = Platform::new(0.0, 200.0, 400.0, 20.0, &BOUNCE);
        let mut player = player_at(100.0, 155.0);
        player.velocity.y = 5.0;

        let landing = player.advance(false, &[platform]);

        assert_eq!(landing, Some(Landing::Bounce));
        assert_eq!(player.velocity.y, -13.0);
        assert!(player.airborne);
    }

    #[test]
    fn test_walls_zero_horizontal_speed() {
        let mut player = player_at(1.0, 100.0);
        player.velocity.x = -MAX_SPEED;
        player.advance(true, &[]);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.velocity.x, 0.0);

        let mut player = player_at(MAP_WIDTH - 2.0 * PLAYER_RADIUS - 1.0, 100.0);
        player.velocity.x = MAX_SPEED;
        player.advance(true, &[]);
        assert_eq!(player.position.x, MAP_WIDTH - 2.0 * PLAYER_RADIUS);
        assert_eq!(player.velocity.x, 0.0);
    }

    #[test]
    fn test_map_floor_grounds_player() {
        let mut player = player_at(100.0, MAP_HEIGHT - 2.0 * PLAYER_RADIUS - 1.0);
        player.velocity.y = 10.0;
        player.airborne = true;
        player.can_double_jump = false;

        player.advance(false, &[]);

        assert_eq!(player.position.y, MAP_HEIGHT - 2.0 * PLAYER_RADIUS);
        assert_eq!(player.velocity.y, 0.0);
        assert!(!player.airborne);
        assert!(player.can_double_jump);
    }

    #[test]
    fn test_top_bound_clamps_position_only() {
        let mut player = player_at(100.0, 2.0);
        player.jump();

        player.advance(false, &[]);

        assert_eq!(player.position.y, 0.0);
        assert_eq!(player.velocity.y, JUMP_FORCE + GRAVITY);
    }

    #[test]
    fn test_jump_from_spawn_height_keeps_upward_velocity() {
        let mut player = player_at(100.0, 0.0);
        assert!(player.jump());

        player.advance(false, &[]);

        assert_eq!(player.position.y, 0.0);
        assert!(player.airborne);
        assert!(player.velocity.y < 0.0);

        // Gravity eventually turns it around and the player drops away
        for _ in 0..40 {
            player.advance(false, &[]);
        }
        assert!(player.velocity.y > 0.0);
        assert!(player.position.y > 0.0);
    }

    #[test]
    fn test_stays_in_bounds_under_random_input() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut player = Player::spawn(&mut rng);
        let max_x = MAP_WIDTH - 2.0 * player.radius;
        let max_y = MAP_HEIGHT - 2.0 * player.radius;

        for _ in 0..5000 {
            if rng.random_bool(0.05) {
                player.jump();
            }
            let steering = rng.random_bool(0.6);
            if steering {
                player.velocity.x = (player.velocity.x + rng.random_range(-2.0f32..2.0))
                    .clamp(-MAX_SPEED, MAX_SPEED);
            }
            player.advance(steering, &WORLD);

            assert!((0.0..=max_x).contains(&player.position.x));
            assert!((0.0..=max_y).contains(&player.position.y));
        }
    }

    #[test]
    fn test_spawn_is_on_top_edge() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            let player = Player::spawn(&mut rng);
            assert_eq!(player.position.y, 0.0);
            assert!(player.position.x >= 0.0 && player.position.x < MAP_WIDTH - 2.0 * PLAYER_RADIUS);
            assert_eq!(player.color.len(), 7);
            assert!(player.color.starts_with('#'));
        }
    }

    #[test]
    fn test_remote_player_mirrors_state() {
        let state = PlayerState {
            x: 10.0,
            y: 20.0,
            color_tag: "#fff".to_string(),
        };
        let mut remote = RemotePlayer::from_state(&state);
        assert_eq!(remote.position, Vec2::new(10.0, 20.0));

        remote.apply(&PlayerState {
            x: 30.0,
            y: 40.0,
            color_tag: "#000".to_string(),
        });
        assert_eq!(remote.position, Vec2::new(30.0, 40.0));
        assert_eq!(remote.color, "#000");
    }
}
