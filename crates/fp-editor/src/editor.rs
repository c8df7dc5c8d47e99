//! Editor state container.
//!
//! Owns the `Store` and the pointer `Interaction`. Every handler returns
//! whether the canvas needs a redraw; the host calls `render` when it does.

use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::store::Store;
use crate::tools::{Action, Interaction, ToolContext, ToolKind};
use fp_core::config::EditorConfig;
use fp_core::generator::GeneratorInput;
use fp_core::geometry::Vec2;
use fp_core::io::ImportError;
use fp_render::frame::{Frame, Preview, Theme, render_frame};

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: Option<ShortcutAction>,
    pub changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    store: Store,
    interaction: Interaction,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: Store::new(config),
            interaction: Interaction::new(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn tool(&self) -> ToolKind {
        self.interaction.tool()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.interaction.set_tool(tool);
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Dispatch any normalized input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, button, .. } => {
                self.pointer_down(Vec2::new(*x, *y), *button)
            }
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Vec2::new(*x, *y)),
            InputEvent::PointerUp { x, y, .. } => self.pointer_up(Vec2::new(*x, *y)),
            InputEvent::Wheel {
                x,
                y,
                dx,
                dy,
                modifiers,
            } => self.wheel(Vec2::new(*x, *y), *dx, *dy, *modifiers),
            InputEvent::Key {
                key,
                modifiers,
                editing_text,
            } => self.key(key, *modifiers, *editing_text).changed,
        }
    }

    pub fn pointer_down(&mut self, screen: Vec2, button: PointerButton) -> bool {
        let actions = self
            .interaction
            .pointer_down(&context(&self.store), screen, button);
        self.apply(actions) || self.interaction.is_dragging()
    }

    pub fn pointer_move(&mut self, screen: Vec2) -> bool {
        let actions = self.interaction.pointer_move(&context(&self.store), screen);
        self.apply(actions) || self.interaction.is_dragging()
    }

    pub fn pointer_up(&mut self, screen: Vec2) -> bool {
        let was_dragging = self.interaction.is_dragging();
        let actions = self.interaction.pointer_up(&context(&self.store), screen);
        self.apply(actions) || was_dragging
    }

    pub fn wheel(&mut self, cursor: Vec2, dx: f64, dy: f64, modifiers: Modifiers) -> bool {
        let actions = self.interaction.wheel(cursor, dx, dy, modifiers);
        self.apply(actions)
    }

    pub fn key(&mut self, key: &str, modifiers: Modifiers, editing_text: bool) -> KeyOutcome {
        let action = ShortcutMap::resolve(key, modifiers, editing_text);
        let changed = match action {
            Some(ShortcutAction::Undo) => self.undo(),
            Some(ShortcutAction::Redo) => self.redo(),
            Some(ShortcutAction::Delete) => self.delete_selected(),
            None => false,
        };
        KeyOutcome { action, changed }
    }

    /// Apply interaction output to the store, in order.
    pub fn apply(&mut self, actions: Vec<Action>) -> bool {
        let changed = !actions.is_empty();
        for action in actions {
            match action {
                Action::AddWall { a, b } => {
                    self.store.add_wall(a, b, None);
                }
                Action::AddRoom { points, name } => {
                    self.store.add_room(points, Some(name));
                }
                Action::UpdateWall { id, patch } => self.store.update_wall(id, &patch),
                Action::UpdateRoom { id, patch } => self.store.update_room(id, &patch),
                Action::Select(selection) => self.store.set_selection(selection),
                Action::PanBy { dx, dy } => self.store.pan_by(dx, dy),
                Action::ZoomAt { cursor, zoom_in } => self.store.zoom_at(cursor, zoom_in),
            }
        }
        changed
    }

    // ─── Document commands ───────────────────────────────────────────────
    //
    // These replace or reshape the plan wholesale, so any gesture in
    // progress is dropped first.

    pub fn undo(&mut self) -> bool {
        self.interaction.cancel();
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.interaction.cancel();
        self.store.redo()
    }

    pub fn delete_selected(&mut self) -> bool {
        self.interaction.cancel();
        self.store.delete_selected()
    }

    pub fn clear(&mut self) {
        self.interaction.cancel();
        self.store.clear();
    }

    pub fn generate(&mut self, input: &GeneratorInput) {
        self.interaction.cancel();
        self.store.generate(input);
    }

    /// # Errors
    /// Propagates the store's `ImportError`; the plan is unchanged on error.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        self.store.import_json(json)?;
        self.interaction.cancel();
        Ok(())
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn preview(&self) -> Option<Preview> {
        self.interaction.preview(&context(&self.store))
    }

    /// Build the display list for a `width` × `height` canvas.
    pub fn render(&self, width: f64, height: f64, theme: &Theme) -> Frame {
        let preview = self.preview();
        render_frame(
            self.store.plan(),
            self.store.viewport(),
            self.store.selection(),
            preview.as_ref(),
            width,
            height,
            theme,
        )
    }
}

fn context(store: &Store) -> ToolContext<'_> {
    ToolContext {
        plan: store.plan(),
        selection: store.selection(),
        viewport: store.viewport(),
        config: store.config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::model::{EntityRef, Selection};

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn wall_gesture_commits_one_history_step() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::Wall);

        let from = editor.store().viewport().world_to_screen(v(0.0, 0.0));
        let to = editor.store().viewport().world_to_screen(v(100.0, 0.0));
        assert!(editor.pointer_down(from, PointerButton::Primary));
        assert!(editor.pointer_move(to));
        assert!(editor.preview().is_some());
        assert!(editor.pointer_up(to));

        let plan = editor.store().plan();
        assert_eq!(plan.walls.len(), 1);
        assert!((plan.walls[0].b.x - 100.0).abs() < 1e-9);
        assert_eq!(editor.store().history().undo_depth(), 1);
        assert!(editor.preview().is_none());
    }

    #[test]
    fn move_commit_reselects_entity() {
        let mut editor = Editor::default();
        let wall = editor.store_mut().add_wall(v(0.0, 0.0), v(100.0, 0.0), None);
        editor
            .store_mut()
            .set_selection(Selection::Single(EntityRef::wall(wall)));

        let vp = *editor.store().viewport();
        editor.pointer_down(vp.world_to_screen(v(50.0, 0.0)), PointerButton::Primary);
        editor.pointer_move(vp.world_to_screen(v(50.0, 40.0)));
        editor.pointer_up(vp.world_to_screen(v(50.0, 40.0)));

        assert_eq!(
            editor.store().selection(),
            &Selection::Single(EntityRef::wall(wall))
        );
        let moved = editor.store().plan().wall(wall).unwrap();
        assert!((moved.a.y - 40.0).abs() < 1e-9);
        assert_eq!(editor.store().history().undo_depth(), 2);
    }

    #[test]
    fn undo_mid_gesture_cancels_session() {
        let mut editor = Editor::default();
        editor.set_tool(ToolKind::Wall);
        editor.store_mut().add_wall(v(0.0, 0.0), v(10.0, 0.0), None);

        editor.pointer_down(v(0.0, 0.0), PointerButton::Primary);
        let outcome = editor.key(
            "z",
            Modifiers {
                ctrl: true,
                ..Default::default()
            },
            false,
        );
        assert_eq!(outcome.action, Some(ShortcutAction::Undo));
        assert!(outcome.changed);
        assert!(!editor.interaction().is_dragging());
        assert!(!editor.pointer_up(v(40.0, 40.0)));
        assert!(editor.store().plan().is_empty());
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut editor = Editor::default();
        let outcome = editor.key("q", Modifiers::default(), false);
        assert_eq!(
            outcome,
            KeyOutcome {
                action: None,
                changed: false
            }
        );
    }

    #[test]
    fn render_reflects_selection_handles() {
        let mut editor = Editor::default();
        let wall = editor.store_mut().add_wall(v(0.0, 0.0), v(100.0, 0.0), None);
        let before = editor.render(800.0, 600.0, &Theme::dark());
        editor
            .store_mut()
            .set_selection(Selection::Single(EntityRef::wall(wall)));
        let after = editor.render(800.0, 600.0, &Theme::dark());
        assert_eq!(after.commands.len(), before.commands.len() + 2);
    }
}
