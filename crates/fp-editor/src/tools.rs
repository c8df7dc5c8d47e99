//! Tool system for canvas interactions.
//!
//! Pointer-down picks a `DragSession` from the active tool, the selection
//! and what is under the cursor. Pointer-move only updates the session (or
//! pans the viewport); the session's proposed geometry is drawn as a
//! preview every frame. Pointer-up turns the final proposal into `Action`s
//! that the editor applies to the store.
//!
//! | Tool | Pointer-down | Session | Commit |
//! |------|--------------|---------|--------|
//! | pan, or middle button | anywhere | `Pan` | none (viewport moves live) |
//! | wall | anywhere | `WallCreate` | add wall |
//! | room | anywhere | `RoomCreate` | add rectangular room named "Room" |
//! | select | handle of selected wall | `MoveWallEnd` | snapped endpoint |
//! | select | body of selected wall | `MoveWall` | rigidly snapped translation |
//! | select | vertex of selected room | `MoveRoomVertex` | snapped vertex |
//! | select | inside selected room | `MoveRoom` | translation |
//! | select | elsewhere | `Marquee` | box selection |
//! | rotate | with a single selection | `Rotate` | rotation about the pivot |

use crate::input::{Modifiers, PointerButton};
use fp_core::config::EditorConfig;
use fp_core::geometry::{Bounds, Vec2, rotate_about};
use fp_core::id::EntityId;
use fp_core::model::{EntityKind, EntityRef, Plan, RoomPatch, Selection, WallPatch};
use fp_core::snap::SnapTargets;
use fp_core::viewport::Viewport;
use fp_render::frame::Preview;
use fp_render::hit::{body_contains, handle_at, hit_test, hit_test_rect};
use smallvec::SmallVec;

/// Name given to rooms drawn with the room tool.
pub const NEW_ROOM_NAME: &str = "Room";

/// The active tool determines how pointer input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Wall,
    Room,
    Rotate,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Wall => "wall",
            ToolKind::Room => "room",
            ToolKind::Rotate => "rotate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "select" => Some(ToolKind::Select),
            "pan" => Some(ToolKind::Pan),
            "wall" => Some(ToolKind::Wall),
            "room" => Some(ToolKind::Room),
            "rotate" => Some(ToolKind::Rotate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    A,
    B,
}

/// A pointer gesture in progress. Positions are world coordinates except
/// for `Pan`, which tracks the last screen position.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
    Pan {
        last: Vec2,
    },
    WallCreate {
        start: Vec2,
        current: Vec2,
    },
    RoomCreate {
        start: Vec2,
        current: Vec2,
    },
    MoveWall {
        id: EntityId,
        start: Vec2,
        current: Vec2,
        orig: (Vec2, Vec2),
    },
    MoveWallEnd {
        id: EntityId,
        end: WallEnd,
        start: Vec2,
        current: Vec2,
        orig: (Vec2, Vec2),
    },
    MoveRoom {
        id: EntityId,
        start: Vec2,
        current: Vec2,
        orig: Vec<Vec2>,
    },
    MoveRoomVertex {
        id: EntityId,
        index: usize,
        start: Vec2,
        current: Vec2,
        orig: Vec<Vec2>,
    },
    /// Pivot and start angle are fixed at pointer-down.
    Rotate {
        target: EntityRef,
        center: Vec2,
        start_angle: f64,
        current: Vec2,
        orig: SmallVec<[Vec2; 4]>,
    },
    Marquee {
        start: Vec2,
        current: Vec2,
    },
}

impl DragSession {
    /// The entity being edited, if any.
    pub fn target(&self) -> Option<EntityRef> {
        match self {
            DragSession::MoveWall { id, .. } | DragSession::MoveWallEnd { id, .. } => {
                Some(EntityRef::wall(*id))
            }
            DragSession::MoveRoom { id, .. } | DragSession::MoveRoomVertex { id, .. } => {
                Some(EntityRef::room(*id))
            }
            DragSession::Rotate { target, .. } => Some(*target),
            _ => None,
        }
    }

    fn track(&mut self, world: Vec2) {
        match self {
            DragSession::Pan { .. } => {}
            DragSession::WallCreate { current, .. }
            | DragSession::RoomCreate { current, .. }
            | DragSession::MoveWall { current, .. }
            | DragSession::MoveWallEnd { current, .. }
            | DragSession::MoveRoom { current, .. }
            | DragSession::MoveRoomVertex { current, .. }
            | DragSession::Rotate { current, .. }
            | DragSession::Marquee { current, .. } => *current = world,
        }
    }

    /// Geometry this session would commit if released now.
    pub fn proposal(&self, plan: &Plan, config: &EditorConfig) -> Option<Preview> {
        let tolerance = config.snap_tolerance;
        let targets = || SnapTargets::collect(plan, self.target());

        match self {
            DragSession::Pan { .. } => None,

            DragSession::WallCreate { start, current } => Some(Preview::NewWall {
                a: *start,
                b: *current,
            }),

            DragSession::RoomCreate { start, current } => Some(Preview::NewRoom {
                a: *start,
                b: *current,
            }),

            DragSession::Marquee { start, current } => Some(Preview::Marquee {
                a: *start,
                b: *current,
            }),

            DragSession::MoveWall {
                start,
                current,
                orig,
                ..
            } => {
                let delta = *current - *start;
                let (a, b) = targets().snap_rigid(orig.0 + delta, orig.1 + delta, tolerance);
                Some(Preview::Wall { a, b })
            }

            DragSession::MoveWallEnd {
                end,
                start,
                current,
                orig,
                ..
            } => {
                let delta = *current - *start;
                let (mut a, mut b) = *orig;
                match end {
                    WallEnd::A => a = targets().snap(a + delta, tolerance),
                    WallEnd::B => b = targets().snap(b + delta, tolerance),
                }
                Some(Preview::Wall { a, b })
            }

            DragSession::MoveRoom {
                start,
                current,
                orig,
                ..
            } => {
                let delta = *current - *start;
                Some(Preview::Room {
                    points: orig.iter().map(|p| *p + delta).collect(),
                })
            }

            DragSession::MoveRoomVertex {
                index,
                start,
                current,
                orig,
                ..
            } => {
                let delta = *current - *start;
                let mut points = orig.clone();
                if let Some(p) = points.get_mut(*index) {
                    *p = targets().snap(*p + delta, tolerance);
                }
                Some(Preview::Room { points })
            }

            DragSession::Rotate {
                target,
                center,
                start_angle,
                current,
                orig,
            } => {
                let angle = angle_about(*center, *current) - start_angle;
                let rotated: Vec<Vec2> = orig
                    .iter()
                    .map(|p| rotate_about(*p, *center, angle))
                    .collect();
                match target.kind {
                    EntityKind::Wall => match rotated.as_slice() {
                        [a, b] => Some(Preview::Wall { a: *a, b: *b }),
                        _ => None,
                    },
                    EntityKind::Room => Some(Preview::Room { points: rotated }),
                }
            }
        }
    }
}

/// What the interaction layer asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddWall { a: Vec2, b: Vec2 },
    AddRoom { points: Vec<Vec2>, name: String },
    UpdateWall { id: EntityId, patch: WallPatch },
    UpdateRoom { id: EntityId, patch: RoomPatch },
    Select(Selection),
    PanBy { dx: f64, dy: f64 },
    /// One wheel tick about a screen-space cursor.
    ZoomAt { cursor: Vec2, zoom_in: bool },
}

/// Read-only view of the editor state a tool needs.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub plan: &'a Plan,
    pub selection: &'a Selection,
    pub viewport: &'a Viewport,
    pub config: &'a EditorConfig,
}

/// The pointer state machine: active tool plus at most one drag session.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    tool: ToolKind,
    session: Option<DragSession>,
    /// Set once the pointer moves during the current session.
    moved: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Any gesture in progress is dropped without committing.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != self.tool {
            self.cancel();
            self.tool = tool;
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Drop the current session without committing.
    pub fn cancel(&mut self) {
        self.session = None;
        self.moved = false;
    }

    /// Preview to draw for the current session. Nothing is shown until the
    /// pointer has moved.
    pub fn preview(&self, ctx: &ToolContext<'_>) -> Option<Preview> {
        if !self.moved {
            return None;
        }
        self.session
            .as_ref()
            .and_then(|s| s.proposal(ctx.plan, ctx.config))
    }

    pub fn pointer_down(
        &mut self,
        ctx: &ToolContext<'_>,
        screen: Vec2,
        button: PointerButton,
    ) -> Vec<Action> {
        self.moved = false;
        let world = ctx.viewport.screen_to_world(screen);

        if self.tool == ToolKind::Pan || button == PointerButton::Middle {
            self.session = Some(DragSession::Pan { last: screen });
            return vec![];
        }

        match self.tool {
            ToolKind::Pan => vec![],
            ToolKind::Wall => {
                self.session = Some(DragSession::WallCreate {
                    start: world,
                    current: world,
                });
                vec![]
            }
            ToolKind::Room => {
                self.session = Some(DragSession::RoomCreate {
                    start: world,
                    current: world,
                });
                vec![]
            }
            ToolKind::Select => {
                if let Some(session) = grab_selected(ctx, world) {
                    self.session = Some(session);
                    return vec![];
                }
                let hit = hit_test(ctx.plan, world, ctx.config.wall_hit_tolerance);
                self.session = Some(DragSession::Marquee {
                    start: world,
                    current: world,
                });
                vec![Action::Select(hit.map_or(Selection::None, Selection::Single))]
            }
            ToolKind::Rotate => {
                self.session = start_rotation(ctx, world);
                vec![]
            }
        }
    }

    pub fn pointer_move(&mut self, ctx: &ToolContext<'_>, screen: Vec2) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };
        self.moved = true;

        if let DragSession::Pan { last } = session {
            let delta = screen - *last;
            *last = screen;
            return vec![Action::PanBy {
                dx: delta.x,
                dy: delta.y,
            }];
        }

        session.track(ctx.viewport.screen_to_world(screen));
        vec![]
    }

    pub fn pointer_up(&mut self, ctx: &ToolContext<'_>, screen: Vec2) -> Vec<Action> {
        let Some(mut session) = self.session.take() else {
            return vec![];
        };
        self.moved = false;

        session.track(ctx.viewport.screen_to_world(screen));
        let Some(proposal) = session.proposal(ctx.plan, ctx.config) else {
            return vec![];
        };
        let target = session.target();
        log::debug!("commit {proposal:?} for {target:?}");

        match (proposal, target) {
            (Preview::NewWall { a, b }, _) => vec![Action::AddWall { a, b }],

            (Preview::NewRoom { a, b }, _) => vec![Action::AddRoom {
                points: Bounds::from_corners(a, b).corners().to_vec(),
                name: NEW_ROOM_NAME.to_string(),
            }],

            (Preview::Marquee { a, b }, _) => {
                let extent = b - a;
                let threshold = ctx.config.marquee_threshold;
                if extent.x.abs() <= threshold && extent.y.abs() <= threshold {
                    // A click: keep the selection made at pointer-down.
                    return vec![];
                }
                let hits = hit_test_rect(ctx.plan, &Bounds::from_corners(a, b));
                let selection = if hits.is_empty() {
                    Selection::None
                } else {
                    Selection::Multi(hits)
                };
                vec![Action::Select(selection)]
            }

            (Preview::Wall { a, b }, Some(entity)) => vec![
                Action::UpdateWall {
                    id: entity.id,
                    patch: WallPatch::endpoints(a, b),
                },
                Action::Select(Selection::Single(entity)),
            ],

            (Preview::Room { points }, Some(entity)) => vec![
                Action::UpdateRoom {
                    id: entity.id,
                    patch: RoomPatch::points(points),
                },
                Action::Select(Selection::Single(entity)),
            ],

            (_, None) => vec![],
        }
    }

    /// Ctrl/⌘ + wheel zooms about the cursor; plain wheel pans.
    pub fn wheel(&self, cursor: Vec2, dx: f64, dy: f64, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            vec![Action::ZoomAt {
                cursor,
                zoom_in: dy < 0.0,
            }]
        } else {
            vec![Action::PanBy { dx: -dx, dy: -dy }]
        }
    }
}

/// Session for grabbing a handle or the body of the single selected entity.
fn grab_selected(ctx: &ToolContext<'_>, world: Vec2) -> Option<DragSession> {
    let entity = ctx.selection.single()?;
    let config = ctx.config;

    match entity.kind {
        EntityKind::Wall => {
            let wall = ctx.plan.wall(entity.id)?;
            let orig = (wall.a, wall.b);
            if let Some(index) = handle_at(ctx.plan, entity, world, config.handle_tolerance) {
                return Some(DragSession::MoveWallEnd {
                    id: wall.id,
                    end: if index == 0 { WallEnd::A } else { WallEnd::B },
                    start: world,
                    current: world,
                    orig,
                });
            }
            body_contains(ctx.plan, entity, world, config.wall_hit_tolerance).then_some(
                DragSession::MoveWall {
                    id: wall.id,
                    start: world,
                    current: world,
                    orig,
                },
            )
        }
        EntityKind::Room => {
            let room = ctx.plan.room(entity.id)?;
            if let Some(index) = handle_at(ctx.plan, entity, world, config.handle_tolerance) {
                return Some(DragSession::MoveRoomVertex {
                    id: room.id,
                    index,
                    start: world,
                    current: world,
                    orig: room.points.clone(),
                });
            }
            body_contains(ctx.plan, entity, world, config.wall_hit_tolerance).then(|| {
                DragSession::MoveRoom {
                    id: room.id,
                    start: world,
                    current: world,
                    orig: room.points.clone(),
                }
            })
        }
    }
}

fn start_rotation(ctx: &ToolContext<'_>, world: Vec2) -> Option<DragSession> {
    let target = ctx.selection.single()?;
    let center = ctx.plan.pivot(target)?;
    let orig = ctx.plan.vertices(target)?;
    Some(DragSession::Rotate {
        target,
        center,
        start_angle: angle_about(center, world),
        current: world,
        orig,
    })
}

fn angle_about(center: Vec2, p: Vec2) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::model::DEFAULT_WALL_THICKNESS;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    /// Identity viewport so screen == world in these tests.
    const IDENTITY: Viewport = Viewport {
        zoom: 1.0,
        offset: Vec2::ZERO,
    };

    struct Fixture {
        plan: Plan,
        selection: Selection,
        config: EditorConfig,
    }

    impl Fixture {
        fn new(plan: Plan) -> Self {
            Self {
                plan,
                selection: Selection::None,
                config: EditorConfig::default(),
            }
        }

        fn ctx(&self) -> ToolContext<'_> {
            ToolContext {
                plan: &self.plan,
                selection: &self.selection,
                viewport: &IDENTITY,
                config: &self.config,
            }
        }
    }

    fn drag(interaction: &mut Interaction, fx: &Fixture, from: Vec2, to: Vec2) -> Vec<Action> {
        let mut actions = interaction.pointer_down(&fx.ctx(), from, PointerButton::Primary);
        actions.extend(interaction.pointer_move(&fx.ctx(), to));
        actions.extend(interaction.pointer_up(&fx.ctx(), to));
        actions
    }

    #[test]
    fn tool_names_roundtrip() {
        for tool in [
            ToolKind::Select,
            ToolKind::Pan,
            ToolKind::Wall,
            ToolKind::Room,
            ToolKind::Rotate,
        ] {
            assert_eq!(ToolKind::from_name(tool.name()), Some(tool));
        }
        assert_eq!(ToolKind::from_name("lasso"), None);
    }

    #[test]
    fn wall_tool_adds_wall_without_snapping() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let fx = Fixture::new(plan);
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Wall);

        let actions = drag(&mut tool, &fx, v(3.0, 3.0), v(3.0, 80.0));
        assert_eq!(
            actions,
            vec![Action::AddWall {
                a: v(3.0, 3.0),
                b: v(3.0, 80.0)
            }]
        );
        assert!(!tool.is_dragging());
    }

    #[test]
    fn room_tool_adds_normalized_rectangle() {
        let fx = Fixture::new(Plan::new());
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Room);

        let actions = drag(&mut tool, &fx, v(50.0, 40.0), v(10.0, 0.0));
        assert_eq!(
            actions,
            vec![Action::AddRoom {
                points: vec![v(10.0, 0.0), v(50.0, 0.0), v(50.0, 40.0), v(10.0, 40.0)],
                name: "Room".into(),
            }]
        );
    }

    #[test]
    fn pan_tool_and_middle_button_pan_live() {
        let fx = Fixture::new(Plan::new());
        let mut tool = Interaction::new();

        tool.pointer_down(&fx.ctx(), v(10.0, 10.0), PointerButton::Middle);
        assert_eq!(
            tool.pointer_move(&fx.ctx(), v(15.0, 7.0)),
            vec![Action::PanBy { dx: 5.0, dy: -3.0 }]
        );
        assert_eq!(
            tool.pointer_move(&fx.ctx(), v(16.0, 7.0)),
            vec![Action::PanBy { dx: 1.0, dy: 0.0 }]
        );
        assert!(tool.pointer_up(&fx.ctx(), v(16.0, 7.0)).is_empty());
        assert!(tool.preview(&fx.ctx()).is_none());
    }

    #[test]
    fn click_selects_hit_and_small_drag_keeps_it() {
        let mut plan = Plan::new();
        let wall = plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let fx = Fixture::new(plan);
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(50.0, 4.0), v(51.0, 5.0));
        assert_eq!(
            actions,
            vec![Action::Select(Selection::Single(EntityRef::wall(wall)))]
        );
    }

    #[test]
    fn marquee_selects_contained_or_nothing() {
        let mut plan = Plan::new();
        let wall = plan.push_wall(v(10.0, 10.0), v(40.0, 10.0), DEFAULT_WALL_THICKNESS);
        plan.push_wall(v(10.0, 20.0), v(400.0, 20.0), DEFAULT_WALL_THICKNESS);
        let fx = Fixture::new(plan);
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(0.0, 0.0), v(100.0, 100.0));
        assert_eq!(
            actions,
            vec![
                Action::Select(Selection::None),
                Action::Select(Selection::Multi(vec![EntityRef::wall(wall)])),
            ]
        );

        let actions = drag(&mut tool, &fx, v(500.0, 500.0), v(600.0, 600.0));
        assert_eq!(actions.last(), Some(&Action::Select(Selection::None)));
    }

    #[test]
    fn marquee_threshold_is_per_axis() {
        let mut plan = Plan::new();
        let wall = plan.push_wall(v(10.0, 10.0), v(10.0, 10.0), DEFAULT_WALL_THICKNESS);
        let fx = Fixture::new(plan);
        let mut tool = Interaction::new();

        // Horizontal drag of 3 with no vertical extent still selects.
        let actions = drag(&mut tool, &fx, v(8.5, 10.0), v(11.5, 10.0));
        assert_eq!(
            actions.last(),
            Some(&Action::Select(Selection::Multi(vec![EntityRef::wall(wall)])))
        );
    }

    #[test]
    fn move_selected_wall_end_snaps_to_other_wall() {
        let mut plan = Plan::new();
        let fixed = plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let moving = plan.push_wall(v(200.0, 100.0), v(300.0, 100.0), DEFAULT_WALL_THICKNESS);
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::wall(moving));
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(201.0, 101.0), v(108.0, 7.0));
        assert_eq!(
            actions,
            vec![
                Action::UpdateWall {
                    id: moving,
                    patch: WallPatch::endpoints(v(100.0, 0.0), v(300.0, 100.0)),
                },
                Action::Select(Selection::Single(EntityRef::wall(moving))),
            ]
        );
        assert_ne!(fixed, moving);
    }

    #[test]
    fn move_wall_body_snaps_rigidly() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        plan.push_wall(v(0.0, 200.0), v(101.0, 200.0), DEFAULT_WALL_THICKNESS);
        let moving = plan.push_wall(v(200.0, 50.0), v(200.0, 250.0), DEFAULT_WALL_THICKNESS);
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::wall(moving));
        let mut tool = Interaction::new();

        // Unsnapped the wall lands at (104,3)-(104,203); `b` is the nearer fit.
        let actions = drag(&mut tool, &fx, v(200.0, 150.0), v(104.0, 103.0));
        assert_eq!(
            actions[0],
            Action::UpdateWall {
                id: moving,
                patch: WallPatch::endpoints(v(101.0, 0.0), v(101.0, 200.0)),
            }
        );
    }

    #[test]
    fn move_wall_body_with_one_end_free_is_not_snapped() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let moving = plan.push_wall(v(200.0, 50.0), v(200.0, 250.0), DEFAULT_WALL_THICKNESS);
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::wall(moving));
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(200.0, 150.0), v(104.0, 103.0));
        assert_eq!(
            actions[0],
            Action::UpdateWall {
                id: moving,
                patch: WallPatch::endpoints(v(104.0, 3.0), v(104.0, 203.0)),
            }
        );
    }

    #[test]
    fn move_room_translates_all_points() {
        let mut plan = Plan::new();
        let room = plan.push_room(
            vec![v(0.0, 0.0), v(100.0, 0.0), v(100.0, 100.0), v(0.0, 100.0)],
            None,
        );
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::room(room));
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(50.0, 50.0), v(70.0, 40.0));
        assert_eq!(
            actions[0],
            Action::UpdateRoom {
                id: room,
                patch: RoomPatch::points(vec![
                    v(20.0, -10.0),
                    v(120.0, -10.0),
                    v(120.0, 90.0),
                    v(20.0, 90.0)
                ]),
            }
        );
    }

    #[test]
    fn move_room_vertex_snaps() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 300.0), v(300.0, 300.0), DEFAULT_WALL_THICKNESS);
        let room = plan.push_room(
            vec![v(0.0, 0.0), v(100.0, 0.0), v(100.0, 100.0), v(0.0, 100.0)],
            None,
        );
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::room(room));
        let mut tool = Interaction::new();

        let actions = drag(&mut tool, &fx, v(100.0, 100.0), v(150.0, 290.0));
        assert_eq!(
            actions[0],
            Action::UpdateRoom {
                id: room,
                patch: RoomPatch::points(vec![
                    v(0.0, 0.0),
                    v(100.0, 0.0),
                    v(150.0, 300.0),
                    v(0.0, 100.0)
                ]),
            }
        );
    }

    #[test]
    fn rotate_wall_quarter_turn() {
        let mut plan = Plan::new();
        let wall = plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let mut fx = Fixture::new(plan);
        fx.selection = Selection::Single(EntityRef::wall(wall));
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Rotate);

        // Pivot (50, 0): sweep from east to south.
        let actions = drag(&mut tool, &fx, v(80.0, 0.0), v(50.0, 30.0));
        match &actions[0] {
            Action::UpdateWall { id, patch } => {
                assert_eq!(*id, wall);
                let (a, b) = (patch.a.unwrap(), patch.b.unwrap());
                assert!((a.x - 50.0).abs() < 1e-9 && (a.y + 50.0).abs() < 1e-9);
                assert!((b.x - 50.0).abs() < 1e-9 && (b.y - 50.0).abs() < 1e-9);
            }
            other => panic!("expected wall update, got {other:?}"),
        }
    }

    #[test]
    fn rotate_without_single_selection_does_nothing() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let fx = Fixture::new(plan);
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Rotate);

        assert!(drag(&mut tool, &fx, v(80.0, 0.0), v(50.0, 30.0)).is_empty());
    }

    #[test]
    fn preview_appears_after_first_move() {
        let fx = Fixture::new(Plan::new());
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Wall);

        tool.pointer_down(&fx.ctx(), v(0.0, 0.0), PointerButton::Primary);
        assert!(tool.preview(&fx.ctx()).is_none());
        tool.pointer_move(&fx.ctx(), v(30.0, 0.0));
        assert_eq!(
            tool.preview(&fx.ctx()),
            Some(Preview::NewWall {
                a: v(0.0, 0.0),
                b: v(30.0, 0.0)
            })
        );
    }

    #[test]
    fn switching_tools_cancels_session() {
        let fx = Fixture::new(Plan::new());
        let mut tool = Interaction::new();
        tool.set_tool(ToolKind::Wall);
        tool.pointer_down(&fx.ctx(), v(0.0, 0.0), PointerButton::Primary);
        tool.set_tool(ToolKind::Select);
        assert!(!tool.is_dragging());
        assert!(tool.pointer_up(&fx.ctx(), v(10.0, 0.0)).is_empty());
    }

    #[test]
    fn wheel_zooms_with_command_and_pans_otherwise() {
        let tool = Interaction::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(
            tool.wheel(v(5.0, 5.0), 0.0, -120.0, ctrl),
            vec![Action::ZoomAt {
                cursor: v(5.0, 5.0),
                zoom_in: true
            }]
        );
        assert_eq!(
            tool.wheel(v(5.0, 5.0), 4.0, 10.0, Modifiers::default()),
            vec![Action::PanBy { dx: -4.0, dy: -10.0 }]
        );
    }
}
