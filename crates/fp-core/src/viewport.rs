//! Pan/zoom mapping between world (cm) and screen (px) coordinates.
//!
//! `screen = world * zoom + offset`. Viewport changes are presentation
//! only: they never touch the plan and never enter undo history.

use crate::config::EditorConfig;
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen pixels per world centimeter.
    pub zoom: f64,
    /// Screen-space translation in pixels.
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.2,
            offset: Vec2::new(200.0, 120.0),
        }
    }
}

impl Viewport {
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.offset.x) / self.zoom,
            (p.y - self.offset.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.zoom + self.offset.x,
            p.y * self.zoom + self.offset.y,
        )
    }

    /// Translate by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Zoom one wheel tick about `cursor` (screen px), keeping the world
    /// point under the cursor fixed. The result is clamped to the
    /// configured zoom range.
    pub fn zoom_at(&mut self, cursor: Vec2, zoom_in: bool, config: &EditorConfig) {
        let before = self.screen_to_world(cursor);
        let factor = if zoom_in {
            1.0 + config.zoom_step
        } else {
            1.0 - config.zoom_step
        };
        let next = (self.zoom * factor).clamp(config.min_zoom, config.max_zoom);
        self.zoom = next;
        self.offset = Vec2::new(cursor.x - before.x * next, cursor.y - before.y * next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_world_roundtrip() {
        let vp = Viewport {
            zoom: 2.0,
            offset: Vec2::new(10.0, -4.0),
        };
        let world = Vec2::new(33.0, 7.5);
        let screen = vp.world_to_screen(world);
        assert_eq!(screen, Vec2::new(76.0, 11.0));
        assert_eq!(vp.screen_to_world(screen), world);
    }

    #[test]
    fn zoom_keeps_cursor_anchor() {
        let config = EditorConfig::default();
        let mut vp = Viewport::default();
        let cursor = Vec2::new(431.0, 287.0);
        let world_before = vp.screen_to_world(cursor);

        for zoom_in in [true, true, false, true, false, false] {
            vp.zoom_at(cursor, zoom_in, &config);
            let screen_after = vp.world_to_screen(world_before);
            assert!((screen_after.x - cursor.x).abs() < 1e-9);
            assert!((screen_after.y - cursor.y).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let config = EditorConfig::default();
        let mut vp = Viewport::default();
        for _ in 0..100 {
            vp.zoom_at(Vec2::ZERO, true, &config);
        }
        assert_eq!(vp.zoom, config.max_zoom);
        for _ in 0..200 {
            vp.zoom_at(Vec2::ZERO, false, &config);
        }
        assert_eq!(vp.zoom, config.min_zoom);
    }

    #[test]
    fn zoom_in_is_ten_percent() {
        let config = EditorConfig::default();
        let mut vp = Viewport {
            zoom: 1.0,
            offset: Vec2::ZERO,
        };
        vp.zoom_at(Vec2::ZERO, true, &config);
        assert!((vp.zoom - 1.1).abs() < 1e-12);
        vp.zoom_at(Vec2::ZERO, false, &config);
        assert!((vp.zoom - 0.99).abs() < 1e-12);
    }
}
