use std::cell::RefCell;
use std::sync::Arc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::game::GameState;
use crate::input::InputState;
use crate::network::NetworkClient;
use crate::render::Renderer;

struct ClientState {
    window: Arc<Window>,
    renderer: Renderer,
    game: GameState,
    input: InputState,
    network: NetworkClient,
}

thread_local! {
    static STATE: RefCell<Option<ClientState>> = const { RefCell::new(None) };
}

struct App;

impl App {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<ClientState, JsValue> {
        let window = event_loop
            .create_window(Window::default_attributes().with_title("Platformer"))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let window = Arc::new(window);

        use winit::platform::web::WindowExtWebSys;
        let canvas = window
            .canvas()
            .ok_or_else(|| JsValue::from_str("window has no canvas"))?;

        let web_window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let width = web_window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = web_window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        canvas
            .style()
            .set_css_text("width: 100%; height: 100%; display: block;");

        web_window
            .document()
            .and_then(|doc| doc.get_element_by_id("wasm-container"))
            .ok_or_else(|| JsValue::from_str("missing #wasm-container"))?
            .append_child(&canvas)?;

        let renderer = Renderer::new(canvas)?;
        let game = GameState::new(Vec2::new(width as f32, height as f32));
        let network = NetworkClient::new()?;

        Ok(ClientState {
            window,
            renderer,
            game,
            input: InputState::new(),
            network,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if STATE.with(|s| s.borrow().is_some()) {
            return;
        }
        match self.start(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                STATE.with(|s| *s.borrow_mut() = Some(state));
            }
            Err(e) => log::error!("Failed to start client: {:?}", e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                STATE.with(|s| {
                    if let Some(state) = s.borrow().as_ref() {
                        state.network.disconnect();
                    }
                });
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                STATE.with(|s| {
                    if let Some(state) = s.borrow_mut().as_mut() {
                        let viewport = Vec2::new(size.width as f32, size.height as f32);
                        state.game.camera.resize(viewport);
                    }
                });
            }
            WindowEvent::Focused(false) => {
                STATE.with(|s| {
                    if let Some(state) = s.borrow_mut().as_mut() {
                        state.input.clear();
                    }
                });
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                STATE.with(|s| {
                    if let Some(state) = s.borrow_mut().as_mut() {
                        match event.state {
                            ElementState::Pressed => state.input.handle_key_press(key),
                            ElementState::Released => state.input.handle_key_release(key),
                        }
                    }
                });
            }
            WindowEvent::RedrawRequested => {
                STATE.with(|s| {
                    if let Some(state) = s.borrow_mut().as_mut() {
                        frame(state);
                        state.window.request_redraw();
                    }
                });
            }
            _ => {}
        }
    }
}

fn frame(state: &mut ClientState) {
    let mut rng = rand::rng();

    for event in state.network.poll_events() {
        state.game.handle_network_event(event, &mut rng);
    }

    if let Some(published) = state.game.update(&mut state.input, &mut rng) {
        state.network.send_player_state(published);
    }

    let time_ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    if let Err(e) = state.renderer.render_frame(&state.game, time_ms) {
        log::error!("Render error: {:?}", e);
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&info.to_string().into())
    }));
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&e.to_string().into());
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    let _ = event_loop.run_app(&mut App);
}
