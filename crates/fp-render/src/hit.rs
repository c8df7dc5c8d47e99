//! Hit testing: world point → entity lookup, and marquee containment.
//!
//! Rooms are tested before walls, each in document order, so the first
//! room containing the point wins even when a wall runs along its edge.

use fp_core::geometry::{Bounds, Vec2, distance, hit_test_segment, point_in_polygon};
use fp_core::model::{EntityKind, EntityRef, Plan};

/// Entity under world point `p`. Walls count as hit within `wall_tolerance`
/// of their center line.
pub fn hit_test(plan: &Plan, p: Vec2, wall_tolerance: f64) -> Option<EntityRef> {
    let room = plan
        .rooms
        .iter()
        .filter(|r| r.is_drawable())
        .find(|r| point_in_polygon(p, &r.points))
        .map(|r| EntityRef::room(r.id));

    room.or_else(|| {
        plan.walls
            .iter()
            .find(|w| hit_test_segment(p, w.a, w.b, wall_tolerance))
            .map(|w| EntityRef::wall(w.id))
    })
}

/// Every entity whose bounding box lies entirely inside `area`.
/// Walls first, then rooms, each in document order.
pub fn hit_test_rect(plan: &Plan, area: &Bounds) -> Vec<EntityRef> {
    let walls = plan
        .walls
        .iter()
        .filter(|w| area.contains_bounds(&Bounds::from_corners(w.a, w.b)))
        .map(|w| EntityRef::wall(w.id));

    let rooms = plan
        .rooms
        .iter()
        .filter(|r| r.is_drawable())
        .filter(|r| Bounds::from_points(&r.points).is_some_and(|b| area.contains_bounds(&b)))
        .map(|r| EntityRef::room(r.id));

    walls.chain(rooms).collect()
}

/// Index of the first vertex of `entity` within `tolerance` of `p`
/// (wall: 0 = `a`, 1 = `b`).
pub fn handle_at(plan: &Plan, entity: EntityRef, p: Vec2, tolerance: f64) -> Option<usize> {
    plan.vertices(entity)?
        .iter()
        .position(|v| distance(p, *v) <= tolerance)
}

/// Whether `p` grabs the body of `entity`: near a wall's center line, or
/// inside a room's polygon.
pub fn body_contains(plan: &Plan, entity: EntityRef, p: Vec2, wall_tolerance: f64) -> bool {
    match entity.kind {
        EntityKind::Wall => plan
            .wall(entity.id)
            .is_some_and(|w| hit_test_segment(p, w.a, w.b, wall_tolerance)),
        EntityKind::Room => plan
            .room(entity.id)
            .is_some_and(|r| point_in_polygon(p, &r.points)),
    }
}
