// Player dimensions and physics
pub const PLAYER_RADIUS: f32 = 20.0;
pub const GRAVITY: f32 = 0.3;
pub const MAX_FALL_SPEED: f32 = 15.0;

// Movement
pub const JUMP_FORCE: f32 = -10.0;
pub const DOUBLE_JUMP_FORCE: f32 = -8.0;
pub const MAX_SPEED: f32 = 5.0;
pub const MIN_SPEED: f32 = 0.1; // below this vx snaps to zero
pub const ACCELERATION: f32 = 0.5;
pub const DECELERATION: f32 = 0.9;

// Platforms
pub const PLATFORM_EDGE_MARGIN: f32 = 5.0; // inset on each side of a platform for landing checks
pub const FRICTION_BLEND: f32 = 0.5; // landing applies half of (1 - friction)

// Camera
pub const CAMERA_SMOOTHNESS: f32 = 0.08;
pub const CAMERA_MAX_SPEED: f32 = 0.2;
pub const CAMERA_DISTANCE_SCALE: f32 = 500.0;
pub const LOOKAHEAD_X: f32 = 10.0;
pub const LOOKAHEAD_Y: f32 = 2.0;
pub const SHAKE_DECAY: f32 = 0.9;
pub const BOUNCE_SHAKE: f32 = 5.0;

// Map
pub const MAP_WIDTH: f32 = 4000.0;
pub const MAP_HEIGHT: f32 = 2000.0;
