use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{MAP_HEIGHT, MAP_WIDTH, PLAYER_RADIUS};
use crate::game::GameState;
use crate::player::Facing;

const SKY: &str = "#87CEEB";
const CLOUD: &str = "rgba(255, 255, 255, 0.8)";
const SHADOW: &str = "rgba(0, 0, 0, 0.2)";
const PLATFORM_TRIM: &str = "rgba(0, 0, 0, 0.1)";
const CLOUD_COUNT: usize = 20;
const TAU: f64 = std::f64::consts::TAU;

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn render_frame(&self, game: &GameState, time_ms: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let viewport = self.viewport();
        ctx.clear_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);

        ctx.save();
        ctx.translate(game.camera.offset.x as f64, game.camera.offset.y as f64)?;

        ctx.set_fill_style_str(SKY);
        ctx.fill_rect(0.0, 0.0, MAP_WIDTH as f64, MAP_HEIGHT as f64);

        ctx.set_fill_style_str(CLOUD);
        for i in 0..CLOUD_COUNT {
            let x = (time_ms / 5000.0 + i as f64 * 500.0) % MAP_WIDTH as f64;
            let y = 100.0 + i as f64 * 80.0;
            self.draw_cloud(x, y)?;
        }

        let (view_min, view_max) = game.camera.visible_world();
        for platform in &game.platforms {
            let (pos, size) = (platform.top_left(), platform.size());
            if pos.cmpgt(view_max).any() || (pos + size).cmplt(view_min).any() {
                continue;
            }
            ctx.set_fill_style_str(platform.surface.color);
            ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            ctx.set_fill_style_str(PLATFORM_TRIM);
            ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, 5.0);
        }

        for remote in game.remote_players.values() {
            self.draw_avatar(remote.center(), PLAYER_RADIUS, &remote.color, Facing::Right)?;
        }
        if let Some(player) = &game.player {
            self.draw_avatar(player.center(), player.radius, &player.color, player.facing)?;
        }

        ctx.restore();
        Ok(())
    }

    fn draw_cloud(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        for (dx, dy, r) in [(0.0, 0.0, 30.0), (25.0, -10.0, 25.0), (25.0, 10.0, 25.0), (50.0, 0.0, 30.0)] {
            ctx.move_to(x + dx + r, y + dy);
            ctx.arc(x + dx, y + dy, r, 0.0, TAU)?;
        }
        ctx.fill();
        Ok(())
    }

    fn draw_avatar(&self, center: Vec2, radius: f32, color: &str, facing: Facing) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (cx, cy, r) = (center.x as f64, center.y as f64, radius as f64);
        let dir = facing.sign() as f64;

        ctx.set_fill_style_str(SHADOW);
        ctx.begin_path();
        ctx.ellipse(cx, cy + r + 5.0, r * 0.8, r * 0.3, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.arc(cx, cy, r, 0.0, TAU)?;
        ctx.fill();

        for (fill, eye_radius) in [("white", 5.0), ("black", 2.0)] {
            ctx.set_fill_style_str(fill);
            ctx.begin_path();
            for side in [-1.0, 1.0] {
                let ex = cx + 5.0 * dir * side;
                ctx.move_to(ex + eye_radius, cy - 5.0);
                ctx.arc(ex, cy - 5.0, eye_radius, 0.0, TAU)?;
            }
            ctx.fill();
        }
        Ok(())
    }
}
