//! Canvas2D playback of a `Frame`.
//!
//! The display list is already in canvas pixels; this module only maps each
//! command onto `CanvasRenderingContext2d` calls.

use fp_core::geometry::Vec2;
use fp_render::frame::{DrawCmd, Frame, LineCap, Stroke};
use web_sys::CanvasRenderingContext2d;

/// Draw every command of `frame` in order.
pub fn draw_frame(ctx: &CanvasRenderingContext2d, frame: &Frame, font_family: &str) {
    ctx.save();
    for cmd in &frame.commands {
        draw_cmd(ctx, cmd, frame, font_family);
    }
    ctx.restore();
}

fn draw_cmd(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd, frame: &Frame, font_family: &str) {
    match cmd {
        DrawCmd::Clear { color } => {
            ctx.set_fill_style_str(&color.to_css());
            ctx.fill_rect(0.0, 0.0, frame.width, frame.height);
        }
        DrawCmd::Line {
            from,
            to,
            width,
            color,
            cap,
        } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.set_line_cap(line_cap_name(*cap));
            ctx.set_line_width(*width);
            ctx.set_stroke_style_str(&color.to_css());
            ctx.stroke();
        }
        DrawCmd::Polygon {
            points,
            fill,
            stroke,
        } => {
            if points.len() < 2 {
                return;
            }
            polygon_path(ctx, points);
            if let Some(fill) = fill {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
            }
            if let Some(stroke) = stroke {
                apply_stroke(ctx, stroke);
                ctx.stroke();
            }
        }
        DrawCmd::Rect {
            min,
            max,
            fill,
            stroke,
        } => {
            let (w, h) = (max.x - min.x, max.y - min.y);
            if let Some(fill) = fill {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(min.x, min.y, w, h);
            }
            if let Some(stroke) = stroke {
                apply_stroke(ctx, stroke);
                ctx.stroke_rect(min.x, min.y, w, h);
            }
        }
        DrawCmd::Text {
            text,
            at,
            size,
            color,
        } => {
            ctx.set_font(&font_spec(*size, font_family));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_fill_style_str(&color.to_css());
            let _ = ctx.fill_text(text, at.x, at.y);
        }
    }
}

fn polygon_path(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        ctx.move_to(first.x, first.y);
    }
    for p in iter {
        ctx.line_to(p.x, p.y);
    }
    ctx.close_path();
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) {
    ctx.set_line_cap("butt");
    ctx.set_line_width(stroke.width);
    ctx.set_stroke_style_str(&stroke.color.to_css());
}

fn line_cap_name(cap: LineCap) -> &'static str {
    match cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
    }
}

fn font_spec(size: f64, family: &str) -> String {
    format!("{size}px {family}")
}
