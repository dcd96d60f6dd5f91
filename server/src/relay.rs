use axum::{
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "colorTag", alias = "color")]
    pub color_tag: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")]
enum ClientMessage {
    #[serde(rename = "updatePlayer")]
    UpdatePlayer(PlayerState),
}

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type")]
enum ServerMessage<'a> {
    #[serde(rename = "welcome")]
    Welcome {
        #[serde(rename = "clientId")]
        client_id: String,
    },
    #[serde(rename = "updatePlayers")]
    UpdatePlayers {
        players: BTreeMap<ClientId, &'a PlayerState>,
    },
}

pub type ClientId = u64;
type ClientSender = mpsc::Sender<String>;

/// Outgoing frames buffered per client. Every snapshot supersedes the last,
/// so a stalled socket loses old snapshots instead of growing its queue.
pub const CLIENT_QUEUE_CAPACITY: usize = 32;

struct ClientInfo {
    sender: ClientSender,
    /// Last published state; `None` until the client first publishes.
    state: Option<PlayerState>,
}

/// Connected clients and the last state each one published.
pub struct RelayState {
    next_id: ClientId,
    clients: HashMap<ClientId, ClientInfo>,
}

impl RelayState {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            clients: HashMap::new(),
        }
    }

    /// Register a connection and greet it with its id.
    pub fn connect(&mut self, sender: ClientSender) -> ClientId {
        let id = self.next_id;
        self.next_id += 1;

        let welcome = ServerMessage::Welcome {
            client_id: id.to_string(),
        };
        if let Ok(json) = serde_json::to_string(&welcome) {
            let _ = sender.try_send(json);
        }

        self.clients.insert(id, ClientInfo { sender, state: None });
        id
    }

    /// Store `state` as the client's latest and fan the full set out to
    /// everyone. Last write wins; there is no ordering between clients.
    pub fn publish(&mut self, id: ClientId, state: PlayerState) {
        if !(state.x.is_finite() && state.y.is_finite()) {
            log::warn!("Client {} sent non-finite position, dropped", id);
            return;
        }
        let Some(client) = self.clients.get_mut(&id) else {
            return;
        };
        client.state = Some(state);
        self.broadcast();
    }

    pub fn disconnect(&mut self, id: ClientId) {
        if self.clients.remove(&id).is_none() {
            return;
        }
        self.broadcast();
        log::info!(
            "Client {} removed, {} clients remaining",
            id,
            self.client_count()
        );
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    fn broadcast(&self) {
        let players = self
            .clients
            .iter()
            .filter_map(|(&id, client)| client.state.as_ref().map(|state| (id, state)))
            .collect();
        let msg = ServerMessage::UpdatePlayers { players };

        match serde_json::to_string(&msg) {
            Ok(json) => {
                for (id, client) in &self.clients {
                    let sent = client.sender.try_send(json.clone());
                    if let Err(mpsc::error::TrySendError::Full(_)) = sent {
                        log::debug!("Client {} is behind, snapshot dropped", id);
                    }
                }
            }
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedRelay = Arc<Mutex<RelayState>>;

pub async fn ws_handler(ws: WebSocketUpgrade, State(relay): State<SharedRelay>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

async fn handle_socket(socket: WebSocket, relay: SharedRelay) {
    let (tx, mut rx) = mpsc::channel::<String>(CLIENT_QUEUE_CAPACITY);
    let client_id = relay.lock().await.connect(tx);

    log::info!("Client {} connected", client_id);

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Task to send messages to client
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_tx.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::UpdatePlayer(state)) => {
                    relay.lock().await.publish(client_id, state);
                }
                Err(e) => log::warn!("Client {} sent malformed message: {}", client_id, e),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    log::info!("Client {} disconnected", client_id);
    relay.lock().await.disconnect(client_id);
    send_task.abort();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn state(x: f32, y: f32, color: &str) -> PlayerState {
        PlayerState {
            x,
            y,
            color_tag: color.to_string(),
        }
    }

    fn channel() -> (ClientSender, mpsc::Receiver<String>) {
        mpsc::channel(CLIENT_QUEUE_CAPACITY)
    }

    fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(text) = rx.try_recv() {
            out.push(serde_json::from_str(&text).unwrap());
        }
        out
    }

    #[test]
    fn test_connect_sends_welcome_with_unique_ids() {
        let mut relay = RelayState::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();

        let a = relay.connect(tx_a);
        let b = relay.connect(tx_b);

        assert_ne!(a, b);
        assert_eq!(drain(&mut rx_a), vec![json!({"type": "welcome", "clientId": a.to_string()})]);
        assert_eq!(drain(&mut rx_b), vec![json!({"type": "welcome", "clientId": b.to_string()})]);
        assert_eq!(relay.client_count(), 2);
    }

    #[test]
    fn test_publish_broadcasts_full_set_to_everyone() {
        let mut relay = RelayState::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();
        let a = relay.connect(tx_a);
        let b = relay.connect(tx_b);
        drain(&mut rx_a);
        drain(&mut rx_b);

        relay.publish(a, state(10.0, 20.0, "#fff"));
        let expected_first = json!({
            "type": "updatePlayers",
            "players": { a.to_string(): {"x": 10.0, "y": 20.0, "colorTag": "#fff"} },
        });
        assert_eq!(drain(&mut rx_a), vec![expected_first.clone()]);
        assert_eq!(drain(&mut rx_b), vec![expected_first]);

        relay.publish(b, state(1.0, 2.0, "#000"));
        let snapshot = drain(&mut rx_a).pop().unwrap();
        assert_eq!(snapshot["players"].as_object().unwrap().len(), 2);
        assert_eq!(snapshot["players"][b.to_string()]["colorTag"], "#000");

        // Last write wins
        relay.publish(a, state(11.0, 21.0, "#fff"));
        let snapshot = drain(&mut rx_b).pop().unwrap();
        assert_eq!(snapshot["players"][a.to_string()]["x"], 11.0);
    }

    #[test]
    fn test_disconnect_removes_and_rebroadcasts() {
        let mut relay = RelayState::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, mut rx_b) = channel();
        let a = relay.connect(tx_a);
        let b = relay.connect(tx_b);
        relay.publish(a, state(10.0, 10.0, "#fff"));
        relay.publish(b, state(20.0, 20.0, "#000"));
        drain(&mut rx_a);
        drain(&mut rx_b);

        relay.disconnect(a);

        let snapshot = drain(&mut rx_b).pop().unwrap();
        let players = snapshot["players"].as_object().unwrap();
        assert_eq!(players.len(), 1);
        assert!(players.contains_key(&b.to_string()));
        assert_eq!(relay.client_count(), 1);

        // Unknown ids are ignored
        relay.disconnect(a);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[test]
    fn test_silent_clients_are_not_in_snapshot() {
        let mut relay = RelayState::new();
        let (tx_a, mut rx_a) = channel();
        let (tx_b, _rx_b) = channel();
        let a = relay.connect(tx_a);
        relay.connect(tx_b);
        drain(&mut rx_a);

        relay.publish(a, state(0.0, 0.0, "#fff"));

        let snapshot = drain(&mut rx_a).pop().unwrap();
        assert_eq!(snapshot["players"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_non_finite_publish_is_dropped() {
        let mut relay = RelayState::new();
        let (tx, mut rx) = channel();
        let a = relay.connect(tx);
        drain(&mut rx);

        relay.publish(a, state(f32::INFINITY, 0.0, "#fff"));

        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_stalled_client_drops_snapshots_without_blocking_others() {
        let mut relay = RelayState::new();
        let (tx_slow, mut rx_slow) = channel();
        let (tx_fast, mut rx_fast) = channel();
        relay.connect(tx_slow);
        let fast = relay.connect(tx_fast);
        drain(&mut rx_fast);

        for i in 0..CLIENT_QUEUE_CAPACITY + 10 {
            relay.publish(fast, state(i as f32, 0.0, "#fff"));
            assert_eq!(drain(&mut rx_fast).len(), 1);
        }

        // Welcome plus as many snapshots as fit
        assert_eq!(drain(&mut rx_slow).len(), CLIENT_QUEUE_CAPACITY);

        relay.publish(fast, state(99.0, 0.0, "#fff"));
        let latest = drain(&mut rx_slow).pop().unwrap();
        assert_eq!(latest["players"][fast.to_string()]["x"], 99.0);
    }

    #[test]
    fn test_parse_client_message() {
        let msg: ClientMessage =
            serde_json::from_str(r##"{"type":"updatePlayer","x":1,"y":2.5,"colorTag":"#abc"}"##).unwrap();
        let ClientMessage::UpdatePlayer(parsed) = msg;
        assert_eq!(parsed, state(1.0, 2.5, "#abc"));

        // Older clients send `color`
        let msg: ClientMessage =
            serde_json::from_str(r##"{"type":"updatePlayer","x":0,"y":0,"color":"#123"}"##).unwrap();
        let ClientMessage::UpdatePlayer(parsed) = msg;
        assert_eq!(parsed.color_tag, "#123");

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"updatePlayer","x":0}"#).is_err());
    }
}
