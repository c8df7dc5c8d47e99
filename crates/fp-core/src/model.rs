//! Plan document model: walls, rooms, entity references, and selection.
//!
//! Walls and rooms are independent ordered collections with no shared
//! vertices, no cross references. Snapping aligns geometry at edit time
//! but nothing about it is stored.

use crate::geometry::{Bounds, Vec2, centroid, midpoint};
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Wall thickness used when the caller doesn't give one (cm).
pub const DEFAULT_WALL_THICKNESS: f64 = 10.0;

// ─── Entities ────────────────────────────────────────────────────────────

/// A straight wall segment. Thickness only affects stroke width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: EntityId,
    pub a: Vec2,
    pub b: Vec2,
    #[serde(serialize_with = "crate::io::serialize_number")]
    pub thickness: f64,
}

impl Wall {
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
}

/// A closed polygon with an optional display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: EntityId,
    pub points: Vec<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Room {
    /// Rooms with fewer than three points are kept in the document but
    /// never drawn or hit.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Wall,
    Room,
}

/// Typed reference to one entity in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub const fn wall(id: EntityId) -> Self {
        Self {
            kind: EntityKind::Wall,
            id,
        }
    }

    pub const fn room(id: EntityId) -> Self {
        Self {
            kind: EntityKind::Room,
            id,
        }
    }
}

// ─── Patches ─────────────────────────────────────────────────────────────

/// Shallow-merge update for a wall. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallPatch {
    pub a: Option<Vec2>,
    pub b: Option<Vec2>,
    pub thickness: Option<f64>,
}

impl WallPatch {
    pub fn endpoints(a: Vec2, b: Vec2) -> Self {
        Self {
            a: Some(a),
            b: Some(b),
            thickness: None,
        }
    }

    pub fn apply(&self, wall: &mut Wall) {
        if let Some(a) = self.a {
            wall.a = a;
        }
        if let Some(b) = self.b {
            wall.b = b;
        }
        if let Some(t) = self.thickness {
            wall.thickness = t;
        }
    }
}

/// Shallow-merge update for a room. `name: Some(None)` clears the name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub points: Option<Vec<Vec2>>,
    pub name: Option<Option<String>>,
}

impl RoomPatch {
    pub fn points(points: Vec<Vec2>) -> Self {
        Self {
            points: Some(points),
            name: None,
        }
    }

    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            points: None,
            name: Some(Some(name.into())),
        }
    }

    pub fn apply(&self, room: &mut Room) {
        if let Some(points) = &self.points {
            room.points = points.clone();
        }
        if let Some(name) = &self.name {
            room.name = name.clone();
        }
    }
}

// ─── Plan ────────────────────────────────────────────────────────────────

/// The floorplan document: the unit of persistence, undo, and generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub walls: Vec<Wall>,
    pub rooms: Vec<Room>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty() && self.rooms.is_empty()
    }

    pub fn wall(&self, id: EntityId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn room(&self, id: EntityId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn contains_id(&self, id: EntityId) -> bool {
        self.wall(id).is_some() || self.room(id).is_some()
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match entity.kind {
            EntityKind::Wall => self.wall(entity.id).is_some(),
            EntityKind::Room => self.room(entity.id).is_some(),
        }
    }

    /// A `<prefix>_<n>` id not used by any wall or room in this plan,
    /// counting up from the entity count.
    pub fn fresh_id(&self, prefix: &str) -> EntityId {
        let mut n = self.walls.len() + self.rooms.len();
        loop {
            let id = EntityId::numbered(prefix, n);
            if !self.contains_id(id) {
                return id;
            }
            n += 1;
        }
    }

    /// Append a wall and return its new id.
    pub fn push_wall(&mut self, a: Vec2, b: Vec2, thickness: f64) -> EntityId {
        let id = self.fresh_id("wall");
        self.walls.push(Wall { id, a, b, thickness });
        id
    }

    /// Append a room and return its new id.
    pub fn push_room(&mut self, points: Vec<Vec2>, name: Option<String>) -> EntityId {
        let id = self.fresh_id("room");
        self.rooms.push(Room { id, points, name });
        id
    }

    /// Patch the wall with `id`. Returns whether it existed.
    pub fn patch_wall(&mut self, id: EntityId, patch: &WallPatch) -> bool {
        match self.walls.iter_mut().find(|w| w.id == id) {
            Some(wall) => {
                patch.apply(wall);
                true
            }
            None => false,
        }
    }

    /// Patch the room with `id`. Returns whether it existed.
    pub fn patch_room(&mut self, id: EntityId, patch: &RoomPatch) -> bool {
        match self.rooms.iter_mut().find(|r| r.id == id) {
            Some(room) => {
                patch.apply(room);
                true
            }
            None => false,
        }
    }

    /// Remove every referenced entity. Returns how many were removed.
    pub fn remove_all(&mut self, entities: &[EntityRef]) -> usize {
        let before = self.walls.len() + self.rooms.len();
        self.walls
            .retain(|w| !entities.contains(&EntityRef::wall(w.id)));
        self.rooms
            .retain(|r| !entities.contains(&EntityRef::room(r.id)));
        before - (self.walls.len() + self.rooms.len())
    }

    /// Editable vertices of an entity: wall endpoints or room points.
    pub fn vertices(&self, entity: EntityRef) -> Option<SmallVec<[Vec2; 4]>> {
        match entity.kind {
            EntityKind::Wall => self.wall(entity.id).map(|w| SmallVec::from_slice(&[w.a, w.b])),
            EntityKind::Room => self.room(entity.id).map(|r| SmallVec::from_slice(&r.points)),
        }
    }

    /// Rotation pivot: wall midpoint or room vertex mean.
    pub fn pivot(&self, entity: EntityRef) -> Option<Vec2> {
        match entity.kind {
            EntityKind::Wall => self.wall(entity.id).map(|w| midpoint(w.a, w.b)),
            EntityKind::Room => self.room(entity.id).and_then(|r| centroid(&r.points)),
        }
    }

    /// Axis-aligned bounds of an entity, if it exists and has points.
    pub fn bounds_of(&self, entity: EntityRef) -> Option<Bounds> {
        self.vertices(entity)
            .and_then(|pts| Bounds::from_points(pts.iter()))
    }

    /// Ids that appear more than once across walls and rooms.
    pub fn duplicate_ids(&self) -> Vec<EntityId> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        let ids = self
            .walls
            .iter()
            .map(|w| w.id)
            .chain(self.rooms.iter().map(|r| r.id));
        for id in ids {
            if !seen.insert(id) && !dupes.contains(&id) {
                dupes.push(id);
            }
        }
        dupes
    }
}

// ─── Selection ───────────────────────────────────────────────────────────

/// What the user currently has selected. Never part of undo history.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    None,
    Single(EntityRef),
    Multi(Vec<EntityRef>),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The single selected entity, if exactly one is selected via click.
    pub fn single(&self) -> Option<EntityRef> {
        match self {
            Selection::Single(e) => Some(*e),
            _ => None,
        }
    }

    pub fn contains(&self, entity: EntityRef) -> bool {
        match self {
            Selection::None => false,
            Selection::Single(e) => *e == entity,
            Selection::Multi(items) => items.contains(&entity),
        }
    }

    /// All referenced entities, in selection order.
    pub fn entities(&self) -> &[EntityRef] {
        match self {
            Selection::None => &[],
            Selection::Single(e) => std::slice::from_ref(e),
            Selection::Multi(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn push_assigns_unique_prefixed_ids() {
        let mut plan = Plan::new();
        let w1 = plan.push_wall(v(0.0, 0.0), v(100.0, 0.0), DEFAULT_WALL_THICKNESS);
        let w2 = plan.push_wall(v(100.0, 0.0), v(100.0, 100.0), DEFAULT_WALL_THICKNESS);
        let r = plan.push_room(vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)], None);
        assert_eq!(w1.as_str(), "wall_0");
        assert_eq!(w2.as_str(), "wall_1");
        assert_eq!(r.as_str(), "room_2");
        assert!(plan.duplicate_ids().is_empty());
    }

    #[test]
    fn fresh_id_skips_taken_ids() {
        let mut plan = Plan::new();
        plan.walls.push(Wall {
            id: EntityId::intern("wall_1"),
            a: v(0.0, 0.0),
            b: v(1.0, 0.0),
            thickness: DEFAULT_WALL_THICKNESS,
        });
        assert_eq!(plan.fresh_id("wall").as_str(), "wall_2");
        assert_eq!(plan.fresh_id("room").as_str(), "room_1");
    }

    #[test]
    fn wall_patch_is_shallow_merge() {
        let mut plan = Plan::new();
        let id = plan.push_wall(v(0.0, 0.0), v(10.0, 0.0), 10.0);
        let patch = WallPatch {
            thickness: Some(25.0),
            ..Default::default()
        };
        assert!(plan.patch_wall(id, &patch));
        let wall = plan.wall(id).unwrap();
        assert_eq!(wall.thickness, 25.0);
        assert_eq!(wall.b, v(10.0, 0.0));
    }

    #[test]
    fn patch_unknown_id_reports_missing() {
        let mut plan = Plan::new();
        plan.push_wall(v(0.0, 0.0), v(10.0, 0.0), 10.0);
        let before = plan.clone();
        assert!(!plan.patch_wall(EntityId::intern("nope"), &WallPatch::default()));
        assert!(!plan.patch_room(EntityId::intern("nope"), &RoomPatch::rename("x")));
        assert_eq!(plan, before);
    }

    #[test]
    fn room_patch_can_clear_name() {
        let mut plan = Plan::new();
        let id = plan.push_room(vec![v(0.0, 0.0)], Some("Den".into()));
        plan.patch_room(
            id,
            &RoomPatch {
                points: None,
                name: Some(None),
            },
        );
        assert_eq!(plan.room(id).unwrap().name, None);
    }

    #[test]
    fn remove_all_filters_by_kind_and_id() {
        let mut plan = Plan::new();
        let w = plan.push_wall(v(0.0, 0.0), v(1.0, 0.0), 10.0);
        let keep = plan.push_wall(v(0.0, 1.0), v(1.0, 1.0), 10.0);
        let r = plan.push_room(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], None);
        // A room ref with a wall id must not remove the wall.
        let removed = plan.remove_all(&[EntityRef::wall(w), EntityRef::room(r), EntityRef::room(keep)]);
        assert_eq!(removed, 2);
        assert_eq!(plan.walls.len(), 1);
        assert_eq!(plan.walls[0].id, keep);
        assert!(plan.rooms.is_empty());
    }

    #[test]
    fn pivot_and_bounds() {
        let mut plan = Plan::new();
        let w = plan.push_wall(v(0.0, 0.0), v(10.0, 20.0), 10.0);
        let r = plan.push_room(vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 2.0), v(0.0, 2.0)], None);
        assert_eq!(plan.pivot(EntityRef::wall(w)), Some(v(5.0, 10.0)));
        assert_eq!(plan.pivot(EntityRef::room(r)), Some(v(2.0, 1.0)));
        let b = plan.bounds_of(EntityRef::wall(w)).unwrap();
        assert_eq!((b.min, b.max), (v(0.0, 0.0), v(10.0, 20.0)));
    }

    #[test]
    fn selection_queries() {
        let a = EntityRef::wall(EntityId::intern("w1"));
        let b = EntityRef::room(EntityId::intern("r1"));
        let multi = Selection::Multi(vec![a, b]);
        assert!(multi.contains(b));
        assert_eq!(multi.single(), None);
        assert_eq!(multi.entities().len(), 2);
        assert_eq!(Selection::Single(a).single(), Some(a));
        assert!(Selection::None.entities().is_empty());
    }
}
