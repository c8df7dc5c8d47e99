//! Plan → display list.
//!
//! `render_frame` is a pure function of the plan, viewport, selection and
//! the live drag preview. It produces screen-space drawing commands in
//! paint order; backends (`paint` for Vello, the wasm Canvas2D bridge)
//! replay them without any knowledge of walls or rooms.

use fp_core::geometry::{Bounds, Vec2, centroid};
use fp_core::model::{EntityRef, Plan, Selection};
use fp_core::viewport::Viewport;

/// Minor grid spacing in world centimeters.
pub const GRID_MINOR_CM: f64 = 20.0;
/// Every fifth minor line (one meter) is drawn in the major shade.
pub const GRID_MAJOR_EVERY: i64 = 5;

// ─── Colors & theme ──────────────────────────────────────────────────────

/// sRGB color with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a byte, for backends that take 8-bit channels.
    pub fn alpha8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// CSS color string (`#rrggbb` when opaque, `rgba(...)` otherwise).
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Colors and sizes used by `render_frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Rgba,
    pub grid_minor: Rgba,
    pub grid_major: Rgba,
    pub wall: Rgba,
    pub wall_selected: Rgba,
    pub room_fill: Rgba,
    pub room_stroke: Rgba,
    pub room_fill_selected: Rgba,
    pub room_stroke_selected: Rgba,
    pub room_stroke_width: f64,
    pub label: Rgba,
    pub label_size: f64,
    pub font_family: &'static str,
    pub handle: Rgba,
    pub preview: Rgba,
    pub preview_width: f64,
    pub marquee_fill: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        let accent = Rgba::rgb(0x22, 0xc5, 0x5e);
        Self {
            background: Rgba::rgb(0x0b, 0x0d, 0x12),
            grid_minor: Rgba::rgb(0x14, 0x1a, 0x26),
            grid_major: Rgba::rgb(0x1f, 0x28, 0x38),
            wall: Rgba::rgb(0xcb, 0xd5, 0xe1),
            wall_selected: accent,
            room_fill: Rgba::rgba(59, 130, 246, 0.12),
            room_stroke: Rgba::rgb(0x60, 0xa5, 0xfa),
            room_fill_selected: Rgba::rgba(34, 197, 94, 0.15),
            room_stroke_selected: accent,
            room_stroke_width: 1.5,
            label: Rgba::rgb(0xcb, 0xd5, 0xe1),
            label_size: 12.0,
            font_family: "system-ui",
            handle: accent,
            preview: accent,
            preview_width: 2.0,
            marquee_fill: Rgba::rgba(34, 197, 94, 0.10),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

// ─── Display list ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

/// One screen-space drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole frame.
    Clear { color: Rgba },
    Line {
        from: Vec2,
        to: Vec2,
        width: f64,
        color: Rgba,
        cap: LineCap,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<Vec2>,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    /// Text centered horizontally on `at`.
    Text {
        text: String,
        at: Vec2,
        size: f64,
        color: Rgba,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCmd>,
}

/// Uncommitted geometry of the active drag, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Rubber-band line of the wall tool.
    NewWall { a: Vec2, b: Vec2 },
    /// Rectangle of the room tool, spanned by two corners.
    NewRoom { a: Vec2, b: Vec2 },
    /// Selection box, spanned by two corners.
    Marquee { a: Vec2, b: Vec2 },
    /// A wall being moved, resized or rotated.
    Wall { a: Vec2, b: Vec2 },
    /// A room being moved, reshaped or rotated.
    Room { points: Vec<Vec2> },
}

/// Screen width of a wall stroke.
pub fn wall_stroke_width(thickness: f64, zoom: f64) -> f64 {
    (thickness * zoom * 0.1).max(2.0)
}

/// Side of a square selection handle in screen pixels.
pub fn handle_size(zoom: f64) -> f64 {
    (6.0 * zoom * 0.5).max(4.0)
}

// ─── Rendering ───────────────────────────────────────────────────────────

/// Build the display list for one frame.
///
/// Layers, back to front: background, grid, rooms, walls, persistent
/// selection handles, drag preview. Persistent handles are skipped while a
/// preview is showing; the preview draws its own.
pub fn render_frame(
    plan: &Plan,
    viewport: &Viewport,
    selection: &Selection,
    preview: Option<&Preview>,
    width: f64,
    height: f64,
    theme: &Theme,
) -> Frame {
    let mut commands = vec![DrawCmd::Clear {
        color: theme.background,
    }];

    push_grid(&mut commands, viewport, width, height, theme);
    push_rooms(&mut commands, plan, viewport, selection, theme);
    push_walls(&mut commands, plan, viewport, selection, theme);

    match preview {
        Some(preview) => push_preview(&mut commands, preview, viewport, theme),
        None => {
            if let Some(entity) = selection.single()
                && let Some(vertices) = plan.vertices(entity)
            {
                let screen: Vec<Vec2> = vertices
                    .iter()
                    .map(|p| viewport.world_to_screen(*p))
                    .collect();
                push_handles(&mut commands, &screen, viewport.zoom, theme);
            }
        }
    }

    Frame {
        width,
        height,
        commands,
    }
}

fn push_grid(out: &mut Vec<DrawCmd>, viewport: &Viewport, width: f64, height: f64, theme: &Theme) {
    let step = GRID_MINOR_CM * viewport.zoom;
    if !(step.is_finite() && step > 0.0) {
        return;
    }

    let shade = |screen: f64, offset: f64| {
        let index = ((screen - offset) / step).round() as i64;
        if index.rem_euclid(GRID_MAJOR_EVERY) == 0 {
            theme.grid_major
        } else {
            theme.grid_minor
        }
    };

    let start_x = viewport.offset.x.rem_euclid(step);
    let mut i = 0.0;
    while start_x + i * step < width {
        let x = start_x + i * step;
        out.push(DrawCmd::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, height),
            width: 1.0,
            color: shade(x, viewport.offset.x),
            cap: LineCap::Butt,
        });
        i += 1.0;
    }

    let start_y = viewport.offset.y.rem_euclid(step);
    let mut i = 0.0;
    while start_y + i * step < height {
        let y = start_y + i * step;
        out.push(DrawCmd::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(width, y),
            width: 1.0,
            color: shade(y, viewport.offset.y),
            cap: LineCap::Butt,
        });
        i += 1.0;
    }
}

fn push_rooms(
    out: &mut Vec<DrawCmd>,
    plan: &Plan,
    viewport: &Viewport,
    selection: &Selection,
    theme: &Theme,
) {
    for room in plan.rooms.iter().filter(|r| r.is_drawable()) {
        let selected = selection.contains(EntityRef::room(room.id));
        let (fill, stroke) = if selected {
            (theme.room_fill_selected, theme.room_stroke_selected)
        } else {
            (theme.room_fill, theme.room_stroke)
        };

        out.push(DrawCmd::Polygon {
            points: room
                .points
                .iter()
                .map(|p| viewport.world_to_screen(*p))
                .collect(),
            fill: Some(fill),
            stroke: Some(Stroke {
                color: stroke,
                width: theme.room_stroke_width,
            }),
        });

        if let Some(name) = room.name.as_deref().filter(|n| !n.is_empty())
            && let Some(center) = centroid(&room.points)
        {
            out.push(DrawCmd::Text {
                text: name.to_string(),
                at: viewport.world_to_screen(center),
                size: theme.label_size,
                color: theme.label,
            });
        }
    }
}

fn push_walls(
    out: &mut Vec<DrawCmd>,
    plan: &Plan,
    viewport: &Viewport,
    selection: &Selection,
    theme: &Theme,
) {
    for wall in &plan.walls {
        let selected = selection.contains(EntityRef::wall(wall.id));
        out.push(DrawCmd::Line {
            from: viewport.world_to_screen(wall.a),
            to: viewport.world_to_screen(wall.b),
            width: wall_stroke_width(wall.thickness, viewport.zoom),
            color: if selected {
                theme.wall_selected
            } else {
                theme.wall
            },
            // A zero-length butt line paints nothing; round caps leave a dot.
            cap: if wall.is_degenerate() {
                LineCap::Round
            } else {
                LineCap::Butt
            },
        });
    }
}

fn push_handles(out: &mut Vec<DrawCmd>, screen_points: &[Vec2], zoom: f64, theme: &Theme) {
    let half = handle_size(zoom) / 2.0;
    for p in screen_points {
        out.push(DrawCmd::Rect {
            min: Vec2::new(p.x - half, p.y - half),
            max: Vec2::new(p.x + half, p.y + half),
            fill: Some(theme.handle),
            stroke: None,
        });
    }
}

fn push_preview(out: &mut Vec<DrawCmd>, preview: &Preview, viewport: &Viewport, theme: &Theme) {
    let outline = Stroke {
        color: theme.preview,
        width: theme.preview_width,
    };
    let screen_box = |a: Vec2, b: Vec2| {
        Bounds::from_corners(viewport.world_to_screen(a), viewport.world_to_screen(b))
    };

    match preview {
        Preview::NewWall { a, b } => out.push(DrawCmd::Line {
            from: viewport.world_to_screen(*a),
            to: viewport.world_to_screen(*b),
            width: theme.preview_width,
            color: theme.preview,
            cap: LineCap::Butt,
        }),
        Preview::NewRoom { a, b } => {
            let rect = screen_box(*a, *b);
            out.push(DrawCmd::Rect {
                min: rect.min,
                max: rect.max,
                fill: Some(theme.room_fill),
                stroke: Some(Stroke {
                    color: theme.room_stroke,
                    width: theme.room_stroke_width,
                }),
            });
        }
        Preview::Marquee { a, b } => {
            let rect = screen_box(*a, *b);
            out.push(DrawCmd::Rect {
                min: rect.min,
                max: rect.max,
                fill: Some(theme.marquee_fill),
                stroke: Some(outline),
            });
        }
        Preview::Wall { a, b } => {
            let (sa, sb) = (viewport.world_to_screen(*a), viewport.world_to_screen(*b));
            out.push(DrawCmd::Line {
                from: sa,
                to: sb,
                width: theme.preview_width,
                color: theme.preview,
                cap: LineCap::Butt,
            });
            push_handles(out, &[sa, sb], viewport.zoom, theme);
        }
        Preview::Room { points } => {
            let screen: Vec<Vec2> = points
                .iter()
                .map(|p| viewport.world_to_screen(*p))
                .collect();
            out.push(DrawCmd::Polygon {
                points: screen.clone(),
                fill: None,
                stroke: Some(outline),
            });
            push_handles(out, &screen, viewport.zoom, theme);
        }
    }
    log::trace!("preview drawn: {preview:?}");
}
