//! Document store: the plan plus everything that edits it.
//!
//! All plan mutations go through `Store`. Each one records the previous
//! plan in `History`, clears the redo branch, applies the change and resets
//! the selection. Viewport and selection changes are never recorded.

use crate::history::History;
use fp_core::config::EditorConfig;
use fp_core::generator::{GeneratorInput, generate_plan};
use fp_core::geometry::Vec2;
use fp_core::id::EntityId;
use fp_core::io::{ImportError, export_plan, import_plan};
use fp_core::model::{Plan, RoomPatch, Selection, WallPatch};
use fp_core::viewport::Viewport;

#[derive(Debug, Clone, Default)]
pub struct Store {
    plan: Plan,
    history: History,
    selection: Selection,
    viewport: Viewport,
    config: EditorConfig,
    /// Bumped whenever the plan changes, including undo and redo.
    revision: u64,
}

impl Store {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            plan: Plan::new(),
            history: History::new(config.history_limit),
            selection: Selection::None,
            viewport: Viewport::default(),
            config,
            revision: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// One zoom step about a screen-space cursor, within the configured range.
    pub fn zoom_at(&mut self, cursor: Vec2, zoom_in: bool) {
        self.viewport.zoom_at(cursor, zoom_in, &self.config);
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Append a wall. `thickness` defaults to the configured wall thickness.
    pub fn add_wall(&mut self, a: Vec2, b: Vec2, thickness: Option<f64>) -> EntityId {
        let thickness = thickness.unwrap_or(self.config.default_wall_thickness);
        self.commit("add wall", |plan| plan.push_wall(a, b, thickness))
    }

    /// Shallow-merge `patch` into the wall with `id`. An unknown id changes
    /// nothing but still takes a history step.
    pub fn update_wall(&mut self, id: EntityId, patch: &WallPatch) {
        let found = self.commit("update wall", |plan| plan.patch_wall(id, patch));
        if !found {
            log::debug!("update_wall: no wall {id:?}");
        }
    }

    pub fn add_room(&mut self, points: Vec<Vec2>, name: Option<String>) -> EntityId {
        self.commit("add room", |plan| plan.push_room(points, name))
    }

    /// Shallow-merge `patch` into the room with `id`. Same unknown-id rule
    /// as `update_wall`.
    pub fn update_room(&mut self, id: EntityId, patch: &RoomPatch) {
        let found = self.commit("update room", |plan| plan.patch_room(id, patch));
        if !found {
            log::debug!("update_room: no room {id:?}");
        }
    }

    /// Remove the selected entities. Returns `false` without recording
    /// history when nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        let targets = self.selection.entities().to_vec();
        if targets.is_empty() {
            self.selection = Selection::None;
            return false;
        }
        let removed = self.commit("delete selection", |plan| plan.remove_all(&targets));
        log::debug!("deleted {removed} of {} selected entities", targets.len());
        true
    }

    /// Replace the plan with an empty one.
    pub fn clear(&mut self) {
        self.commit("clear plan", |plan| *plan = Plan::new());
    }

    /// Replace the plan with a generated layout in a single history step.
    pub fn generate(&mut self, input: &GeneratorInput) {
        let generated = generate_plan(input, self.config.generated_wall_thickness);
        self.commit("generate layout", |plan| *plan = generated);
    }

    pub fn undo(&mut self) -> bool {
        let stepped = self.history.undo(&mut self.plan);
        if stepped {
            self.selection = Selection::None;
            self.revision += 1;
            log::debug!("undo ({} left)", self.history.undo_depth());
        }
        stepped
    }

    pub fn redo(&mut self) -> bool {
        let stepped = self.history.redo(&mut self.plan);
        if stepped {
            self.selection = Selection::None;
            self.revision += 1;
            log::debug!("redo ({} left)", self.history.redo_depth());
        }
        stepped
    }

    // ─── Import / export ─────────────────────────────────────────────────

    pub fn export_json(&self) -> String {
        export_plan(&self.plan)
    }

    /// Replace the plan with an imported document. On failure the error is
    /// logged and the store is left untouched.
    ///
    /// # Errors
    /// Returns the `ImportError` describing why the document was rejected.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        match import_plan(json) {
            Ok(imported) => {
                self.commit("import plan", |plan| *plan = imported);
                Ok(())
            }
            Err(e) => {
                log::error!("Invalid JSON import: {e}");
                Err(e)
            }
        }
    }

    fn commit<R>(&mut self, label: &str, mutate: impl FnOnce(&mut Plan) -> R) -> R {
        self.history.record(self.plan.clone());
        let result = mutate(&mut self.plan);
        self.selection = Selection::None;
        self.revision += 1;
        log::debug!(
            "{label}: {} walls, {} rooms, undo depth {}",
            self.plan.walls.len(),
            self.plan.rooms.len(),
            self.history.undo_depth()
        );
        result
    }
}
