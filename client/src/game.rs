use glam::Vec2;
use rand::Rng;
use std::collections::HashMap;

use crate::camera::Camera;
use crate::collision::Landing;
use crate::config::BOUNCE_SHAKE;
use crate::input::InputState;
use crate::network::{NetworkEvent, PeerId, PlayerState};
use crate::platform::{Platform, WORLD};
use crate::player::{Player, RemotePlayer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected(PeerId),
    Disconnected,
}

/// Everything one client session owns: the local avatar, mirrored peers,
/// the camera and the fixed platform layout.
pub struct GameState {
    pub player: Option<Player>,
    pub remote_players: HashMap<PeerId, RemotePlayer>,
    pub platforms: Vec<Platform>,
    pub camera: Camera,
    pub connection: ConnectionState,
}

impl GameState {
    pub fn new(viewport: Vec2) -> Self {
        Self::with_platforms(WORLD.to_vec(), viewport)
    }

    pub fn with_platforms(platforms: Vec<Platform>, viewport: Vec2) -> Self {
        Self {
            player: None,
            remote_players: HashMap::new(),
            platforms,
            camera: Camera::new(viewport),
            connection: ConnectionState::Connecting,
        }
    }

    pub fn local_id(&self) -> Option<&PeerId> {
        match &self.connection {
            ConnectionState::Connected(id) => Some(id),
            _ => None,
        }
    }

    /// Run one frame: input, physics, camera. Returns the state to publish
    /// when connected.
    pub fn update<R: Rng + ?Sized>(&mut self, input: &mut InputState, rng: &mut R) -> Option<PlayerState> {
        let jump = input.take_jump();
        let player = self.player.as_mut()?;

        if jump {
            player.jump();
        }
        let steering = input.steer(player);

        if player.advance(steering, &self.platforms) == Some(Landing::Bounce) {
            log::debug!("Bounced at ({:.1}, {:.1})", player.position.x, player.position.y);
            self.camera.shake(BOUNCE_SHAKE);
        }

        self.camera.follow(player, rng);

        match self.connection {
            ConnectionState::Connected(_) => Some(player.snapshot()),
            _ => None,
        }
    }

    pub fn handle_network_event<R: Rng + ?Sized>(&mut self, event: NetworkEvent, rng: &mut R) {
        match event {
            NetworkEvent::Connected { id } => {
                let player = Player::spawn(rng);
                log::info!(
                    "Joined as {} at x={:.0} with color {}",
                    id,
                    player.position.x,
                    player.color
                );
                self.player = Some(player);
                self.connection = ConnectionState::Connected(id);
            }
            NetworkEvent::Disconnected => {
                // Keep simulating; peers freeze at their last known state.
                log::warn!(
                    "Relay link lost, {} remote players frozen",
                    self.remote_players.len()
                );
                self.connection = ConnectionState::Disconnected;
            }
            NetworkEvent::Players(players) => self.apply_snapshot(players),
        }
    }

    /// Replace the remote set with a full relay snapshot. Peers are created
    /// on first sight, hard-set on every snapshot and dropped once absent.
    pub fn apply_snapshot(&mut self, players: HashMap<PeerId, PlayerState>) {
        let local_id = self.local_id().cloned();

        self.remote_players.retain(|id, _| players.contains_key(id));

        for (id, state) in players {
            if local_id.as_ref() == Some(&id) {
                continue;
            }
            if !state.is_valid() {
                log::warn!("Ignoring invalid state for {}", id);
                self.remote_players.remove(&id);
                continue;
            }
            match self.remote_players.get_mut(&id) {
                Some(remote) => remote.apply(&state),
                None => {
                    log::debug!("Remote player {} appeared", id);
                    self.remote_players.insert(id, RemotePlayer::from_state(&state));
                }
            }
        }
    }
}
