//! vpad-player demo
//!
//! Minimal game loop on top of the input layer: a marker moved with the
//! d-pad and recoloured by the face buttons. On a phone with `vpad: enabled`
//! the controls are drawn under the shrunken canvas and driven by touch.

use macroquad::prelude::*;
use macroquad::logging::{info, warn};
use vpad_player::config::{PlayerConfig, CONFIG_FILE};
use vpad_player::debug::draw_gamepad_debug;
use vpad_player::device;
use vpad_player::input::{activate, now_ms, Action, InputState};
use vpad_player::overlay::{canvas_rect, Overlay};
use vpad_player::VERSION;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("vpad-player v{}", VERSION),
        window_width: 960,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Command-line attributes win; otherwise `vpad.ron`; otherwise defaults
async fn load_config() -> PlayerConfig {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        match PlayerConfig::from_args(args) {
            Ok(config) => return config,
            Err(e) => warn!("Ignoring command line: {}", e),
        }
    }
    match load_string(CONFIG_FILE).await {
        Ok(source) => match PlayerConfig::from_ron(&source) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid {}: {}, using defaults", CONFIG_FILE, e);
                PlayerConfig::default()
            }
        },
        Err(_) => PlayerConfig::default(),
    }
}

fn marker_color(input: &InputState) -> Color {
    if input.action_down(Action::A) {
        Color::from_rgba(90, 200, 120, 255)
    } else if input.action_down(Action::B) {
        Color::from_rgba(230, 90, 90, 255)
    } else if input.action_down(Action::X) {
        Color::from_rgba(90, 140, 230, 255)
    } else if input.action_down(Action::Y) {
        Color::from_rgba(230, 200, 80, 255)
    } else {
        WHITE
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = load_config().await;
    let device = device::detect();
    info!("Device: {} (mobile: {})", device.user_agent, device.is_mobile());

    let screen = Rect::new(0.0, 0.0, screen_width(), screen_height());
    let vpad = activate(&config, &device, screen, now_ms());
    let overlay = match vpad {
        Some(_) => Some(Overlay::load(&config.assets).await),
        None => None,
    };
    let mut input = InputState::new(vpad, config.stick_deadzone);
    device::apply_touch_policy(input.touch_policy());

    let mut pos = vec2(screen.w * 0.5, screen.h * 0.4);
    let mut show_debug = false;

    loop {
        input.poll();

        let screen = Rect::new(0.0, 0.0, screen_width(), screen_height());
        let canvas = if input.backend().is_virtual() {
            canvas_rect(screen, config.layout.canvas_ratio)
        } else {
            screen
        };

        if input.action_pressed(Action::Select) {
            show_debug = !show_debug;
        }
        if input.action_pressed(Action::Start) {
            pos = canvas.center();
        }

        let mut dir = input.left_stick();
        if input.action_down(Action::Up) { dir.y = 1.0; }
        if input.action_down(Action::Down) { dir.y = -1.0; }
        if input.action_down(Action::Left) { dir.x = -1.0; }
        if input.action_down(Action::Right) { dir.x = 1.0; }
        let speed = 240.0 * get_frame_time();
        pos.x = (pos.x + dir.x * speed).clamp(canvas.x + 12.0, canvas.x + canvas.w - 12.0);
        pos.y = (pos.y - dir.y * speed).clamp(canvas.y + 12.0, canvas.y + canvas.h - 12.0);

        clear_background(Color::from_rgba(10, 10, 14, 255));
        draw_rectangle(canvas.x, canvas.y, canvas.w, canvas.h, Color::from_rgba(24, 26, 34, 255));
        draw_text(&config.title, canvas.x + 12.0, canvas.y + 28.0, 24.0, GRAY);
        draw_rectangle(pos.x - 12.0, pos.y - 12.0, 24.0, 24.0, marker_color(&input));

        if let (Some(overlay), Some(pad)) = (&overlay, input.virtual_pad()) {
            overlay.draw(pad);
        }
        if show_debug {
            draw_gamepad_debug(Rect::new(canvas.x + 12.0, canvas.y + 40.0, canvas.w.min(620.0) - 24.0, 220.0), &input);
        }

        next_frame().await;
    }
}
