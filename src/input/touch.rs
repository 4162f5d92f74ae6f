//! Touch event translation
//!
//! macroquad hands out the current touches once per frame with a phase per
//! finger. The virtual pad expects browser-style start/move/end events, so
//! each frame is turned into at most two of those.

use macroquad::input::{Touch, TouchPhase};
use macroquad::math::Vec2;

/// Browser-style touch event
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    /// A finger went down; carries every active touch point
    Start(Vec<Vec2>),
    /// A finger moved; carries every active touch point
    Move(Vec<Vec2>),
    /// A finger lifted or was cancelled
    End,
}

/// How much of the page's default touch behaviour (scroll, zoom) is blocked.
///
/// The game canvas already blocks its own touches; this only decides whether
/// the rest of the document is blocked too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchPolicy {
    /// Leave the page's own handling alone
    #[default]
    PageDefault,
    /// Virtual pad active: block every touch on the document
    All,
}

impl TouchPolicy {
    /// Flag handed to the page's touch guard (1 = block everything)
    pub fn suppress_all_flag(&self) -> i32 {
        match self {
            TouchPolicy::PageDefault => 0,
            TouchPolicy::All => 1,
        }
    }
}

/// Convert touches from physical framebuffer pixels to the logical pixels
/// `screen_width()`/`screen_height()` and the overlay layout use.
///
/// A non-finite or non-positive scale is treated as 1.
pub fn to_logical(touches: &[Touch], dpi_scale: f32) -> Vec<Touch> {
    let scale = if dpi_scale.is_finite() && dpi_scale > 0.0 { dpi_scale } else { 1.0 };
    touches
        .iter()
        .map(|t| Touch {
            id: t.id,
            phase: t.phase,
            position: t.position / scale,
        })
        .collect()
}

fn is_active(phase: TouchPhase) -> bool {
    matches!(phase, TouchPhase::Started | TouchPhase::Moved | TouchPhase::Stationary)
}

/// Translate one frame of touches into events, end first.
///
/// A finger lifting clears the whole pad, and fingers that only rest in place
/// do not re-press until they move again.
pub fn translate(touches: &[Touch]) -> Vec<TouchEvent> {
    let mut events = Vec::new();

    if touches
        .iter()
        .any(|t| matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled))
    {
        events.push(TouchEvent::End);
    }

    let active: Vec<Vec2> = touches
        .iter()
        .filter(|t| is_active(t.phase))
        .map(|t| t.position)
        .collect();

    if touches.iter().any(|t| t.phase == TouchPhase::Started) {
        events.push(TouchEvent::Start(active));
    } else if touches.iter().any(|t| t.phase == TouchPhase::Moved) {
        events.push(TouchEvent::Move(active));
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> Touch {
        Touch { id, phase, position: Vec2::new(x, y) }
    }

    #[test]
    fn test_no_touches_no_events() {
        assert!(translate(&[]).is_empty());
    }

    #[test]
    fn test_stationary_only_is_silent() {
        assert!(translate(&[touch(1, TouchPhase::Stationary, 1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_start_carries_all_active_points() {
        let events = translate(&[
            touch(1, TouchPhase::Stationary, 1.0, 1.0),
            touch(2, TouchPhase::Started, 5.0, 5.0),
        ]);
        assert_eq!(
            events,
            vec![TouchEvent::Start(vec![Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)])]
        );
    }

    #[test]
    fn test_move() {
        let events = translate(&[touch(1, TouchPhase::Moved, 3.0, 4.0)]);
        assert_eq!(events, vec![TouchEvent::Move(vec![Vec2::new(3.0, 4.0)])]);
    }

    #[test]
    fn test_end_comes_before_move() {
        let events = translate(&[
            touch(1, TouchPhase::Ended, 1.0, 1.0),
            touch(2, TouchPhase::Moved, 2.0, 2.0),
        ]);
        assert_eq!(
            events,
            vec![TouchEvent::End, TouchEvent::Move(vec![Vec2::new(2.0, 2.0)])]
        );
    }

    #[test]
    fn test_cancel_counts_as_end() {
        let events = translate(&[touch(1, TouchPhase::Cancelled, 1.0, 1.0)]);
        assert_eq!(events, vec![TouchEvent::End]);
    }

    #[test]
    fn test_touch_policy_flag() {
        assert_eq!(TouchPolicy::default(), TouchPolicy::PageDefault);
        assert_eq!(TouchPolicy::PageDefault.suppress_all_flag(), 0);
        assert_eq!(TouchPolicy::All.suppress_all_flag(), 1);
    }

    #[test]
    fn test_to_logical_divides_by_dpi() {
        let logical = to_logical(&[touch(7, TouchPhase::Started, 130.0, 1391.6)], 2.0);
        assert_eq!(logical.len(), 1);
        assert_eq!(logical[0].id, 7);
        assert_eq!(logical[0].phase, TouchPhase::Started);
        assert!((logical[0].position.x - 65.0).abs() < 1e-3);
        assert!((logical[0].position.y - 695.8).abs() < 1e-3);
    }

    #[test]
    fn test_to_logical_ignores_bad_scale() {
        let t = [touch(1, TouchPhase::Moved, 10.0, 20.0)];
        assert_eq!(to_logical(&t, 0.0)[0].position, Vec2::new(10.0, 20.0));
        assert_eq!(to_logical(&t, f32::NAN)[0].position, Vec2::new(10.0, 20.0));
    }
}
