//! Relay protocol message types and serialization.
//!
//! Every frame is a JSON object tagged with a `type` field. Clients publish
//! their own state with `updatePlayer`; the relay answers every publish (and
//! every disconnect) with the complete `updatePlayers` map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque connection id assigned by the relay.
pub type PeerId = String;

/// Published avatar state, as sent and received on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "colorTag", alias = "color")]
    pub color_tag: String,
}

impl PlayerState {
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ============================================================================
// Relay messages (incoming)
// ============================================================================

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Sent once after connecting, carrying our connection id.
    #[serde(rename = "welcome")]
    Welcome {
        #[serde(rename = "clientId")]
        client_id: PeerId,
    },

    /// Full set of published states, keyed by connection id.
    #[serde(rename = "updatePlayers")]
    UpdatePlayers { players: HashMap<PeerId, PlayerState> },
}

impl ServerMessage {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

// ============================================================================
// Relay commands (outgoing)
// ============================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum ClientCommand {
    /// Publish our avatar state.
    #[serde(rename = "updatePlayer")]
    UpdatePlayer(PlayerState),
}
