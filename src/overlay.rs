//! On-screen gamepad overlay
//!
//! Layout of the shrunken game canvas and the two control images, plus
//! drawing them with the pressed sectors highlighted.

use macroquad::prelude::*;
use macroquad::logging::warn;
use crate::config::{OverlayAssets, OverlayConfig};
use crate::input::{button, GamepadState, VirtualGamepad};

/// Screen areas used while the virtual pad is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRects {
    /// Game canvas, shrunk to leave room below it for the controls
    pub canvas: Rect,
    /// D-pad image, bottom-left
    pub cross: Rect,
    /// Face button image, bottom-right
    pub button: Rect,
}

impl OverlayRects {
    pub fn compute(screen: Rect, layout: &OverlayConfig) -> Self {
        let size = layout.pad_size;
        let top = screen.y + screen.h - layout.margin - size;
        Self {
            canvas: canvas_rect(screen, layout.canvas_ratio),
            cross: Rect::new(screen.x + layout.margin, top, size, size),
            button: Rect::new(screen.x + screen.w - layout.margin - size, top, size, size),
        }
    }
}

/// Game canvas area: full width, `ratio` of the height, anchored at the top
pub fn canvas_rect(screen: Rect, ratio: f32) -> Rect {
    Rect::new(screen.x, screen.y, screen.w, screen.h * ratio.clamp(0.0, 1.0))
}

/// Loaded control images. A missing image falls back to plain circles.
pub struct Overlay {
    cross: Option<Texture2D>,
    button: Option<Texture2D>,
}

async fn load_image(path: &str) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Linear);
            Some(tex)
        }
        Err(e) => {
            warn!("Failed to load overlay image {}: {}", path, e);
            None
        }
    }
}

const BASE: Color = Color::new(0.85, 0.85, 0.9, 0.35);
const LIT: Color = Color::new(1.0, 1.0, 1.0, 0.45);

impl Overlay {
    pub async fn load(assets: &OverlayAssets) -> Self {
        Self {
            cross: load_image(&assets.cross).await,
            button: load_image(&assets.button).await,
        }
    }

    /// Draw both controls at the rects the pad captured on activation
    pub fn draw(&self, pad: &VirtualGamepad) {
        let rects = pad.rects();
        let state = pad.state();
        draw_control(self.cross.as_ref(), rects.cross);
        draw_control(self.button.as_ref(), rects.button);

        // Highlight pressed directions as dots on the rim
        let dirs = [
            (button::DPAD_UP, 0.0, -1.0),
            (button::DPAD_DOWN, 0.0, 1.0),
            (button::DPAD_LEFT, -1.0, 0.0),
            (button::DPAD_RIGHT, 1.0, 0.0),
        ];
        draw_highlights(state, rects.cross, &dirs);

        let faces = [
            (button::A, 0.0, 1.0),
            (button::B, 1.0, 0.0),
            (button::X, -1.0, 0.0),
            (button::Y, 0.0, -1.0),
        ];
        draw_highlights(state, rects.button, &faces);
    }
}

fn draw_control(texture: Option<&Texture2D>, rect: Rect) {
    match texture {
        Some(tex) => draw_texture_ex(
            tex,
            rect.x,
            rect.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(rect.w, rect.h)),
                ..Default::default()
            },
        ),
        None => {
            let c = rect.center();
            draw_circle(c.x, c.y, rect.w * 0.5, BASE);
            draw_circle_lines(c.x, c.y, rect.w * 0.5, 2.0, LIT);
        }
    }
}

fn draw_highlights(state: &GamepadState, rect: Rect, spots: &[(usize, f32, f32)]) {
    let c = rect.center();
    let reach = rect.w * 0.32;
    for &(index, dx, dy) in spots {
        if state.is_pressed(index) {
            draw_circle(c.x + dx * reach, c.y + dy * reach, rect.w * 0.12, LIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_shrinks_to_ratio() {
        let canvas = canvas_rect(Rect::new(0.0, 0.0, 400.0, 800.0), 0.8);
        assert_eq!(canvas, Rect::new(0.0, 0.0, 400.0, 640.0));
    }

    #[test]
    fn test_controls_sit_in_bottom_corners() {
        let layout = OverlayConfig { pad_size: 100.0, margin: 10.0, canvas_ratio: 0.8 };
        let rects = OverlayRects::compute(Rect::new(0.0, 0.0, 400.0, 800.0), &layout);
        assert_eq!(rects.cross, Rect::new(10.0, 690.0, 100.0, 100.0));
        assert_eq!(rects.button, Rect::new(290.0, 690.0, 100.0, 100.0));
        assert_eq!(rects.canvas.h, 640.0);
    }
}
