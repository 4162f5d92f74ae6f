//! Gamepad debug view
//!
//! Shows which source is active, the devices it reports, and every button slot.

use macroquad::prelude::*;
use crate::input::{button, InputState, BUTTON_COUNT};

const LABEL: Color = Color::new(0.59, 0.59, 0.63, 1.0);
const ON: Color = Color::new(0.39, 0.78, 0.39, 1.0);
const OFF: Color = Color::new(0.2, 0.2, 0.22, 1.0);

/// Draw the debug panel into `rect`
pub fn draw_gamepad_debug(rect: Rect, input: &InputState) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(20, 22, 28, 230));

    let x = rect.x + 20.0;
    let mut y = rect.y + 30.0;

    let source = if input.backend().is_virtual() { "virtual (touch)" } else { "physical" };
    draw_text(&format!("Source: {}", source), x, y, 20.0, WHITE);
    y += 28.0;

    if !input.has_gamepad() {
        draw_text("No Controller Detected", x, y, 16.0, Color::from_rgba(255, 100, 100, 255));
        return;
    }

    for gp in input.gamepads().get_gamepads() {
        draw_text(
            &format!("#{} {} [{}] t={:.0}", gp.index, gp.id, gp.mapping.as_str(), gp.timestamp),
            x,
            y,
            14.0,
            LABEL,
        );
        y += 22.0;

        // Two rows of nine slots
        let slot_w = ((rect.w - 40.0) / 9.0).min(64.0);
        for i in 0..BUTTON_COUNT {
            let col = (i % 9) as f32;
            let row = (i / 9) as f32;
            let sx = x + col * slot_w;
            let sy = y + row * 34.0;
            let color = if gp.buttons[i].pressed { ON } else { OFF };
            draw_circle(sx + 8.0, sy + 6.0, 6.0, color);
            draw_text(button::name(i), sx + 18.0, sy + 11.0, 12.0, LABEL);
        }
        y += 34.0 * 2.0 + 10.0;
    }
}
