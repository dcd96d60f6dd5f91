//! Client side of the relay link.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Game Code (game.rs)                    │
//! │  - Handles NetworkEvent                 │
//! │  - Returns the state to publish         │
//! └───────────────────┬─────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────┐
//! │  NetworkClient (this module)            │
//! │  - Translates relay events ↔ game       │
//! └───────────────────┬─────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────┐
//! │  RelayClient (relay.rs)                 │
//! │  - WebSocket, JSON frames               │
//! └─────────────────────────────────────────┘
//! ```

pub mod protocol;
pub mod queue;
pub mod relay;

use std::collections::HashMap;

pub use protocol::{PeerId, PlayerState};
pub use relay::RelayEvent;

use protocol::ServerMessage;

/// Events emitted by the network layer for game code to handle.
#[derive(Clone, Debug, PartialEq)]
pub enum NetworkEvent {
    /// The relay accepted us under this id.
    Connected { id: PeerId },
    /// The relay link dropped.
    Disconnected,
    /// Complete set of published states, our own entry included.
    Players(HashMap<PeerId, PlayerState>),
}

/// Map a raw relay event onto what the game cares about.
pub fn translate(event: RelayEvent) -> Option<NetworkEvent> {
    match event {
        RelayEvent::Opened => None,
        RelayEvent::Error => None,
        RelayEvent::Closed => Some(NetworkEvent::Disconnected),
        RelayEvent::Message(ServerMessage::Welcome { client_id }) => {
            Some(NetworkEvent::Connected { id: client_id })
        }
        RelayEvent::Message(ServerMessage::UpdatePlayers { players }) => {
            Some(NetworkEvent::Players(players))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use client::NetworkClient;

#[cfg(target_arch = "wasm32")]
mod client {
    use super::relay::RelayClient;
    use super::{NetworkEvent, PlayerState, translate};

    pub struct NetworkClient {
        relay: RelayClient,
    }

    impl NetworkClient {
        pub fn new() -> Result<Self, wasm_bindgen::JsValue> {
            let relay = RelayClient::connect()?;
            Ok(Self { relay })
        }

        /// Poll for network events. Call this each frame.
        pub fn poll_events(&mut self) -> Vec<NetworkEvent> {
            self.relay
                .poll_events()
                .into_iter()
                .filter_map(translate)
                .collect()
        }

        pub fn send_player_state(&self, state: PlayerState) {
            self.relay.send_player_state(state);
        }

        pub fn disconnect(&self) {
            self.relay.close();
        }
    }
}
