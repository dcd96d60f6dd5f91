use crate::config::{FRICTION_BLEND, PLATFORM_EDGE_MARGIN};
use crate::platform::Platform;
use crate::player::Player;

/// What happened when the player touched down this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Came to rest on the surface.
    Rest,
    /// Thrown back up by a bounce surface.
    Bounce,
}

/// Whether a descending player crossed the top edge of `platform` during
/// this tick's vertical displacement. Positions are post-integration.
pub fn crossed_top(player: &Player, platform: &Platform) -> bool {
    let diameter = player.radius * 2.0;
    let bottom = player.position.y + diameter;
    let vy = player.velocity.y;

    let was_above = bottom - vy <= platform.y;
    let overlaps_x = player.position.x + diameter > platform.x + PLATFORM_EDGE_MARGIN
        && player.position.x < platform.x + platform.width - PLATFORM_EDGE_MARGIN;
    let crossed = bottom > platform.y && bottom < platform.y + platform.height + vy;

    was_above && overlaps_x && crossed
}

/// Snap a descending player onto the platform it fell through.
///
/// Only downward motion is resolved: a player moving up or sideways passes
/// through platforms. When several platforms match, the last one in
/// `platforms` wins.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> Option<Landing> {
    if player.velocity.y <= 0.0 {
        return None;
    }

    let platform = platforms.iter().rev().find(|p| crossed_top(player, p))?;

    player.position.y = platform.y - player.radius * 2.0;
    player.can_double_jump = true;

    match platform.surface.bounce {
        Some(bounce) => {
            player.velocity.y = bounce;
            player.airborne = true;
            Some(Landing::Bounce)
        }
        None => {
            let friction = platform.surface.friction;
            player.velocity.y = 0.0;
            player.airborne = false;
            // Half-strength friction blend
            player.velocity.x *= friction + (1.0 - friction) * FRICTION_BLEND;
            Some(Landing::Rest)
        }
    }
}
