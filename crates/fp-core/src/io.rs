//! JSON import/export of a plan.
//!
//! The document shape is `{"plan": {"walls": [...], "rooms": [...]}}`.
//! Export pretty-prints with two-space indentation; import checks the shape
//! before decoding and never returns a partially applied plan.

use crate::model::Plan;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Why an import was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("unexpected document shape: {0}")]
    Shape(&'static str),
    #[error("invalid plan entry: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    plan: &'a Plan,
}

/// Serialize a plan as the pretty-printed `{"plan": ...}` document.
pub fn export_plan(plan: &Plan) -> String {
    match serde_json::to_string_pretty(&DocumentRef { plan }) {
        Ok(text) => text,
        Err(e) => {
            // Only reachable with non-string map keys, which Plan never has.
            log::error!("plan export failed: {e}");
            String::new()
        }
    }
}

/// Parse and validate a `{"plan": ...}` document.
///
/// # Errors
/// `Parse` for malformed JSON, `Shape` when `plan.walls` / `plan.rooms` are
/// missing or not arrays, `Decode` when an entry doesn't match the schema.
pub fn import_plan(json: &str) -> Result<Plan, ImportError> {
    let data: Value = serde_json::from_str(json).map_err(ImportError::Parse)?;

    let plan_value = data
        .get("plan")
        .ok_or(ImportError::Shape("missing `plan` object"))?;
    if !plan_value.get("walls").is_some_and(Value::is_array) {
        return Err(ImportError::Shape("`plan.walls` must be an array"));
    }
    if !plan_value.get("rooms").is_some_and(Value::is_array) {
        return Err(ImportError::Shape("`plan.rooms` must be an array"));
    }

    let plan = Plan::deserialize(plan_value).map_err(ImportError::Decode)?;

    let dupes = plan.duplicate_ids();
    if !dupes.is_empty() {
        log::warn!("imported plan reuses ids: {dupes:?}");
    }
    log::debug!(
        "imported plan: {} walls, {} rooms",
        plan.walls.len(),
        plan.rooms.len()
    );
    Ok(plan)
}

/// Write integral values without a fractional part (`100`, not `100.0`),
/// matching what a browser's `JSON.stringify` produces for the same plan.
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    #[test]
    fn export_uses_two_space_indent_and_integral_numbers() {
        let mut plan = Plan::new();
        plan.push_wall(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.5), 10.0);
        let text = export_plan(&plan);
        assert!(text.starts_with("{\n  \"plan\": {\n    \"walls\": ["));
        assert!(text.contains("\"x\": 100,"));
        assert!(text.contains("\"y\": 0.5"));
        assert!(text.contains("\"thickness\": 10"));
    }

    #[test]
    fn unnamed_rooms_omit_name() {
        let mut plan = Plan::new();
        plan.push_room(vec![Vec2::new(0.0, 0.0)], None);
        assert!(!export_plan(&plan).contains("\"name\""));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(import_plan("{not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for doc in [
            r#"{"walls": [], "rooms": []}"#,
            r#"{"plan": {"walls": []}}"#,
            r#"{"plan": {"walls": {}, "rooms": []}}"#,
            r#"{"plan": {"walls": [], "rooms": "none"}}"#,
            r#"[]"#,
        ] {
            assert!(
                matches!(import_plan(doc), Err(ImportError::Shape(_))),
                "accepted {doc}"
            );
        }
    }

    #[test]
    fn rejects_bad_entries() {
        let doc = r#"{"plan": {"walls": [{"id": "w", "a": {"x": 0, "y": 0}}], "rooms": []}}"#;
        assert!(matches!(import_plan(doc), Err(ImportError::Decode(_))));
    }

    #[test]
    fn accepts_null_room_name() {
        let doc = r#"{"plan": {"walls": [], "rooms": [{"id": "r", "points": [], "name": null}]}}"#;
        let plan = import_plan(doc).unwrap();
        assert_eq!(plan.rooms[0].name, None);
    }
}
