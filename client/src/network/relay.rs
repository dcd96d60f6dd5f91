//! WebSocket link to the relay server.
//!
//! The browser client lives behind `cfg(target_arch = "wasm32")`; the event
//! type it produces is plain data so the frame loop can be exercised natively.

use super::protocol::ServerMessage;

/// Events from the relay link, in arrival order.
#[derive(Debug, Clone)]
pub enum RelayEvent {
    /// Socket opened; the relay's welcome follows.
    Opened,
    /// Socket closed. No reconnection is attempted.
    Closed,
    /// Transport error on the socket.
    Error,
    Message(ServerMessage),
}

#[cfg(target_arch = "wasm32")]
pub use client::{RelayClient, relay_url};

#[cfg(target_arch = "wasm32")]
mod client {
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{MessageEvent, WebSocket};

    use super::RelayEvent;
    use crate::network::protocol::{ClientCommand, PlayerState, ServerMessage};
    use crate::network::queue::EventQueue;

    /// `ws(s)://<page host>/ws`, matching the page's own scheme.
    pub fn relay_url() -> String {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let (Ok(protocol), Ok(host)) = (location.protocol(), location.host()) {
                let ws_protocol = if protocol == "https:" { "wss:" } else { "ws:" };
                return format!("{}//{}/ws", ws_protocol, host);
            }
        }
        "ws://localhost:3000/ws".to_string()
    }

    pub struct RelayClient {
        ws: WebSocket,
        incoming: Rc<EventQueue<RelayEvent>>,
    }

    impl RelayClient {
        pub fn connect() -> Result<Self, JsValue> {
            let url = relay_url();
            log::info!("Connecting to relay: {}", url);

            let ws = WebSocket::new(&url)?;
            let incoming = Rc::new(EventQueue::new());

            let incoming_clone = incoming.clone();
            let onopen = Closure::wrap(Box::new(move |_: JsValue| {
                log::info!("Connected to relay");
                incoming_clone.push(RelayEvent::Opened);
            }) as Box<dyn FnMut(JsValue)>);
            ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
            onopen.forget();

            let incoming_clone = incoming.clone();
            let onmessage = Closure::wrap(Box::new(move |ev: MessageEvent| {
                if let Some(text) = ev.data().as_string() {
                    match ServerMessage::parse(&text) {
                        Ok(msg) => incoming_clone.push(RelayEvent::Message(msg)),
                        Err(e) => log::warn!("Failed to parse relay message: {} ({})", text, e),
                    }
                }
            }) as Box<dyn FnMut(MessageEvent)>);
            ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
            onmessage.forget();

            let incoming_clone = incoming.clone();
            let onerror = Closure::wrap(Box::new(move |_: JsValue| {
                log::error!("Relay socket error");
                incoming_clone.push(RelayEvent::Error);
            }) as Box<dyn FnMut(JsValue)>);
            ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            let incoming_clone = incoming.clone();
            let onclose = Closure::wrap(Box::new(move |_: JsValue| {
                log::info!("Relay socket closed");
                incoming_clone.push(RelayEvent::Closed);
            }) as Box<dyn FnMut(JsValue)>);
            ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
            onclose.forget();

            Ok(Self { ws, incoming })
        }

        pub fn poll_events(&self) -> Vec<RelayEvent> {
            self.incoming.drain()
        }

        pub fn is_open(&self) -> bool {
            self.ws.ready_state() == WebSocket::OPEN
        }

        /// Fire-and-forget; dropped silently while the socket is not open.
        pub fn send_player_state(&self, state: PlayerState) {
            if !self.is_open() {
                return;
            }
            let cmd = ClientCommand::UpdatePlayer(state);
            if let Ok(json) = serde_json::to_string(&cmd) {
                let _ = self.ws.send_with_str(&json);
            }
        }

        pub fn close(&self) {
            let _ = self.ws.close();
        }
    }
}
