//! WASM bridge for Floorplanner: exposes the Rust editor to the browser shell.
//!
//! Compiled via `wasm-pack build --target web`. The shell owns the DOM, the
//! clipboard and file pickers; everything crossing the boundary is numbers,
//! booleans or JSON strings.

mod console;
mod render2d;

use fp_core::config::EditorConfig;
use fp_core::generator::GeneratorInput;
use fp_core::id::EntityId;
use fp_core::model::{EntityKind, EntityRef, RoomPatch, Selection};
use fp_core::viewport::Viewport;
use fp_editor::editor::Editor;
use fp_editor::input::{InputEvent, Modifiers, PointerButton};
use fp_editor::shortcuts::ShortcutAction;
use fp_editor::tools::ToolKind;
use fp_render::frame::Theme;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
///
/// Holds the editor (store + interaction) and the canvas size. All input
/// from the page goes through this struct.
#[wasm_bindgen]
pub struct FpCanvas {
    editor: Editor,
    theme: Theme,
    width: f64,
    height: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionInfo<'a> {
    mode: &'static str,
    entities: &'a [EntityRef],
}

#[wasm_bindgen]
impl FpCanvas {
    /// Create a controller with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_editor(Editor::new(EditorConfig::default()), width, height)
    }

    /// Create a controller from an `EditorConfig` JSON object. Invalid
    /// config falls back to defaults.
    pub fn with_config(width: f64, height: f64, config_json: &str) -> FpCanvas {
        let config = EditorConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("Ignoring editor config: {e}");
            EditorConfig::default()
        });
        Self::with_editor(Editor::new(config), width, height)
    }

    /// Render the current state to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let frame = self.editor.render(self.width, self.height, &self.theme);
        render2d::draw_frame(ctx, &frame, self.theme.font_family);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // ─── Pointer / wheel ─────────────────────────────────────────────────

    /// Handle pointer down. `button` is the DOM `MouseEvent.button` code.
    /// Returns true if the canvas needs a redraw.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: i16,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let mods = modifiers(shift, ctrl, alt, meta);
        let event = InputEvent::from_pointer_down(x, y, PointerButton::from_dom(button), mods);
        self.editor.handle_event(&event)
    }

    /// Handle pointer move. Returns true if the canvas needs a redraw.
    pub fn handle_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let event = InputEvent::from_pointer_move(x, y, modifiers(shift, ctrl, alt, meta));
        self.editor.handle_event(&event)
    }

    /// Handle pointer up. Returns a JSON string:
    /// `{"changed":bool,"documentChanged":bool}`
    ///
    /// `documentChanged` tells the shell to refresh anything derived from
    /// the plan (room list, saved copy).
    pub fn handle_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let revision = self.editor.store().revision();
        let event = InputEvent::from_pointer_up(x, y, modifiers(shift, ctrl, alt, meta));
        let changed = self.editor.handle_event(&event);
        let document_changed = self.editor.store().revision() != revision;
        format!(r#"{{"changed":{changed},"documentChanged":{document_changed}}}"#)
    }

    /// Handle a wheel event at cursor `(x, y)`. Ctrl/⌘ zooms, otherwise pans.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_wheel(
        &mut self,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        self.editor.handle_event(&InputEvent::Wheel {
            x,
            y,
            dx,
            dy,
            modifiers: modifiers(shift, ctrl, alt, meta),
        })
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. `editing_text` is true when focus is in an
    /// input, textarea or content-editable element. Returns a JSON string:
    /// `{"changed":bool,"action":"<action_name>"}`
    ///
    /// Modifier flags come in the same order as the pointer handlers.
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
        editing_text: bool,
    ) -> String {
        let outcome = self
            .editor
            .key(key, modifiers(shift, ctrl, alt, meta), editing_text);
        let action = outcome.action.map_or("none", ShortcutAction::name);
        let changed = outcome.changed;
        format!(r#"{{"changed":{changed},"action":"{action}"}}"#)
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Switch the active tool. Unknown names select the Select tool.
    pub fn set_tool(&mut self, name: &str) {
        let tool = ToolKind::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown tool {name:?}, using select");
            ToolKind::Select
        });
        self.editor.set_tool(tool);
    }

    pub fn get_tool_name(&self) -> String {
        self.editor.tool().name().to_string()
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Current selection as JSON:
    /// `{"mode":"none"|"single"|"multi","entities":[{"type":"wall","id":"..."}]}`
    pub fn get_selection_json(&self) -> String {
        let selection = self.editor.store().selection();
        let info = SelectionInfo {
            mode: match selection {
                Selection::None => "none",
                Selection::Single(_) => "single",
                Selection::Multi(_) => "multi",
            },
            entities: selection.entities(),
        };
        serde_json::to_string(&info).unwrap_or_else(|_| r#"{"mode":"none","entities":[]}"#.into())
    }

    /// Select a wall or room by id; an empty id clears the selection.
    /// Returns `false` if no entity has that id.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        let store = self.editor.store_mut();
        if id.is_empty() {
            store.set_selection(Selection::None);
            return true;
        }
        let id = EntityId::intern(id);
        let entity = if store.plan().wall(id).is_some() {
            EntityRef::wall(id)
        } else if store.plan().room(id).is_some() {
            EntityRef::room(id)
        } else {
            return false;
        };
        store.set_selection(Selection::Single(entity));
        true
    }

    /// Name of the single selected room, if any.
    pub fn get_selected_room_name(&self) -> Option<String> {
        let store = self.editor.store();
        let entity = store.selection().single()?;
        if entity.kind != EntityKind::Room {
            return None;
        }
        store.plan().room(entity.id)?.name.clone()
    }

    /// Rename the single selected room, keeping it selected.
    /// Returns `false` when the selection is not exactly one room.
    ///
    /// Unlike the store's room updates, which reset the selection, this
    /// re-selects the room so the sidebar keeps editing it.
    pub fn rename_selected_room(&mut self, name: &str) -> bool {
        let store = self.editor.store_mut();
        let Some(entity) = store.selection().single() else {
            return false;
        };
        if entity.kind != EntityKind::Room {
            return false;
        }
        store.update_room(entity.id, &RoomPatch::rename(name));
        store.set_selection(Selection::Single(entity));
        true
    }

    // ─── Document commands ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.store().history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.store().history().can_redo()
    }

    /// Delete the selected entities. Returns true if anything was selected.
    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Replace the plan with an empty one (undoable).
    pub fn clear(&mut self) {
        self.editor.clear();
    }

    /// Replace the plan with a generated layout from a JSON
    /// `{bedrooms, bathrooms, garageSpots, sqft, style}` object; missing
    /// fields take their defaults. Returns `false` on malformed input.
    pub fn generate(&mut self, input_json: &str) -> bool {
        match serde_json::from_str::<GeneratorInput>(input_json) {
            Ok(input) => {
                self.editor.generate(&input);
                true
            }
            Err(e) => {
                log::warn!("Invalid generator input: {e}");
                false
            }
        }
    }

    /// Serialize the plan as pretty-printed `{"plan": ...}` JSON.
    pub fn export_json(&self) -> String {
        self.editor.store().export_json()
    }

    /// Replace the plan with an imported document. Returns JSON:
    /// `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn import_json(&mut self, json: &str) -> String {
        match self.editor.import_json(json) {
            Ok(()) => r#"{"ok":true}"#.to_string(),
            Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
        }
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    /// Viewport as `{"zoom":number,"offset":{"x":number,"y":number}}`.
    pub fn get_viewport_json(&self) -> String {
        serde_json::to_string(self.editor.store().viewport()).unwrap_or_default()
    }

    /// Restore a viewport saved with `get_viewport_json`. Zoom is clamped to
    /// the configured range. Returns `false` on malformed input.
    pub fn set_viewport_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Viewport>(json) {
            Ok(mut viewport) => {
                let config = self.editor.store().config();
                if !viewport.zoom.is_finite() {
                    log::warn!("Ignoring viewport with zoom {}", viewport.zoom);
                    return false;
                }
                viewport.zoom = viewport.zoom.clamp(config.min_zoom, config.max_zoom);
                self.editor.store_mut().set_viewport(viewport);
                true
            }
            Err(e) => {
                log::warn!("Invalid viewport JSON: {e}");
                false
            }
        }
    }
}

impl FpCanvas {
    fn with_editor(editor: Editor, width: f64, height: f64) -> Self {
        console::init();
        Self {
            editor,
            theme: Theme::dark(),
            width,
            height,
        }
    }
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KITCHEN: &str = r#"{"plan":{"walls":[],"rooms":[{"id":"r1","points":[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10},{"x":0,"y":10}],"name":"Kitchen"}]}}"#;

    #[test]
    fn import_reports_status_json() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        assert_eq!(canvas.import_json(KITCHEN), r#"{"ok":true}"#);

        let rejected = canvas.import_json(r#"{"walls":[]}"#);
        let value: serde_json::Value = serde_json::from_str(&rejected).unwrap();
        assert_eq!(value["ok"], false);
        assert!(value["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn rename_keeps_room_selected() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        canvas.import_json(KITCHEN);
        assert!(!canvas.rename_selected_room("Pantry"));

        assert!(canvas.select_by_id("r1"));
        assert!(canvas.rename_selected_room("Pantry"));
        assert_eq!(canvas.get_selected_room_name().as_deref(), Some("Pantry"));
        assert_eq!(
            canvas.get_selection_json(),
            r#"{"mode":"single","entities":[{"type":"room","id":"r1"}]}"#
        );
        assert!(canvas.undo());
        assert_eq!(canvas.get_selection_json(), r#"{"mode":"none","entities":[]}"#);
    }

    #[test]
    fn key_json_names_action() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        canvas.import_json(KITCHEN);
        canvas.select_by_id("r1");

        assert_eq!(
            canvas.handle_key("Backspace", false, false, false, false, true),
            r#"{"changed":false,"action":"none"}"#
        );
        assert_eq!(
            canvas.handle_key("Delete", false, false, false, false, false),
            r#"{"changed":true,"action":"delete"}"#
        );
        assert_eq!(
            canvas.handle_key("z", false, true, false, false, false),
            r#"{"changed":true,"action":"undo"}"#
        );
    }

    #[test]
    fn key_modifiers_follow_pointer_order() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        canvas.import_json(KITCHEN);
        assert!(canvas.undo());

        // Shift alone is not a command chord.
        assert_eq!(
            canvas.handle_key("Z", true, false, false, false, false),
            r#"{"changed":false,"action":"none"}"#
        );
        assert_eq!(
            canvas.handle_key("Z", true, true, false, false, false),
            r#"{"changed":true,"action":"redo"}"#
        );
        assert!(canvas.can_undo());
    }

    #[test]
    fn viewport_json_roundtrip_clamps_zoom() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        assert!(canvas.set_viewport_json(r#"{"zoom":40,"offset":{"x":5,"y":-7}}"#));
        let saved: serde_json::Value = serde_json::from_str(&canvas.get_viewport_json()).unwrap();
        assert_eq!(saved["zoom"], 5.0);
        assert_eq!(saved["offset"]["x"], 5.0);
        assert!(!canvas.set_viewport_json("{}"));
    }

    #[test]
    fn generate_accepts_partial_input() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        assert!(canvas.generate(r#"{"bedrooms":2,"style":"ranch"}"#));
        let exported: serde_json::Value = serde_json::from_str(&canvas.export_json()).unwrap();
        assert_eq!(exported["plan"]["walls"].as_array().map(Vec::len), Some(4));
        assert!(!canvas.generate(r#"{"style":"gothic"}"#));
        assert!(canvas.can_undo());
    }

    #[test]
    fn wall_tool_drag_reports_document_change() {
        let mut canvas = FpCanvas::new(800.0, 600.0);
        canvas.set_tool("wall");
        assert_eq!(canvas.get_tool_name(), "wall");

        assert!(canvas.handle_pointer_down(100.0, 100.0, 0, false, false, false, false));
        assert!(canvas.handle_pointer_move(300.0, 100.0, false, false, false, false));
        assert_eq!(
            canvas.handle_pointer_up(300.0, 100.0, false, false, false, false),
            r#"{"changed":true,"documentChanged":true}"#
        );
        assert_eq!(
            canvas.handle_pointer_up(300.0, 100.0, false, false, false, false),
            r#"{"changed":false,"documentChanged":false}"#
        );

        canvas.set_tool("lasso");
        assert_eq!(canvas.get_tool_name(), "select");
    }
}
