//! Display list → Vello drawing commands.
//!
//! Replays a `Frame` into a `vello::Scene`: fills, strokes, closed paths.
//! Text labels need a font context and are only traced for now.

use crate::frame::{DrawCmd, Frame, LineCap, Rgba, Stroke};
use fp_core::geometry::Vec2;
use kurbo::{Affine, BezPath, Cap, Line, Point, Rect, Stroke as KurboStroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Paint one frame into `scene`.
///
/// Call once per frame with a freshly-cleared `Scene`; the caller owns
/// presentation. `DrawCmd::Text` is skipped (only traced), so room labels
/// appear in the Canvas2D backend but not in this one.
pub fn paint_frame(scene: &mut Scene, frame: &Frame) {
    for cmd in &frame.commands {
        paint_cmd(scene, frame, cmd);
    }
}

fn paint_cmd(scene: &mut Scene, frame: &Frame, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Clear { color } => {
            let rect = Rect::new(0.0, 0.0, frame.width, frame.height);
            scene.fill(Fill::NonZero, Affine::IDENTITY, to_color(color), None, &rect);
        }

        DrawCmd::Line {
            from,
            to,
            width,
            color,
            cap,
        } => {
            let line = Line::new(point(*from), point(*to));
            let cap = match cap {
                LineCap::Butt => Cap::Butt,
                LineCap::Round => Cap::Round,
            };
            let stroke = KurboStroke {
                width: *width,
                start_cap: cap,
                end_cap: cap,
                ..Default::default()
            };
            scene.stroke(&stroke, Affine::IDENTITY, to_color(color), None, &line);
        }

        DrawCmd::Polygon {
            points,
            fill,
            stroke,
        } => {
            let Some(path) = closed_path(points) else {
                return;
            };
            fill_shape(scene, &path, fill.as_ref());
            stroke_shape(scene, &path, stroke.as_ref());
        }

        DrawCmd::Rect {
            min,
            max,
            fill,
            stroke,
        } => {
            let rect = Rect::new(min.x, min.y, max.x, max.y);
            fill_shape(scene, &rect, fill.as_ref());
            stroke_shape(scene, &rect, stroke.as_ref());
        }

        DrawCmd::Text { text, at, size, .. } => {
            log::trace!("TEXT {:?} {}px at ({}, {})", text, size, at.x, at.y);
            // Glyph layout needs a font context; deferred to the font milestone.
        }
    }
}

// ─── Fill and stroke ─────────────────────────────────────────────────────────

fn fill_shape<S: kurbo::Shape>(scene: &mut Scene, shape: &S, fill: Option<&Rgba>) {
    if let Some(color) = fill {
        scene.fill(Fill::NonZero, Affine::IDENTITY, to_color(color), None, shape);
    }
}

fn stroke_shape<S: kurbo::Shape>(scene: &mut Scene, shape: &S, stroke: Option<&Stroke>) {
    if let Some(stroke) = stroke {
        let kurbo_stroke = KurboStroke::new(stroke.width);
        scene.stroke(&kurbo_stroke, Affine::IDENTITY, to_color(&stroke.color), None, shape);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn point(p: Vec2) -> Point {
    Point::new(p.x, p.y)
}

fn closed_path(points: &[Vec2]) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(point(*first));
    for p in rest {
        path.line_to(point(*p));
    }
    path.close_path();
    Some(path)
}

fn to_color(c: &Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.alpha8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_path_needs_points() {
        assert!(closed_path(&[]).is_none());
        let path = closed_path(&[Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)])
            .unwrap();
        // move + 2 lines + close
        assert_eq!(path.elements().len(), 4);
    }

    #[test]
    fn colors_keep_alpha() {
        let c = to_color(&Rgba::rgba(59, 130, 246, 0.12));
        assert_eq!(c.to_rgba8().a, 31);
    }
}
