//! Undo/Redo history of whole-plan snapshots.
//!
//! Plans are small value trees, so every mutating action records the plan
//! as it was before the change. `past` runs oldest → most recent and
//! `future` nearest-redo first. Any new record clears `future`.

use fp_core::model::Plan;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Plan>,
    future: VecDeque<Plan>,
    /// Maximum undo depth. `None` = unbounded.
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            limit,
        }
    }

    /// Push the pre-mutation plan and drop the redo branch.
    pub fn record(&mut self, before: Plan) {
        self.past.push_back(before);
        self.future.clear();
        self.trim();
    }

    /// Step back. Returns `false` (and leaves `current` alone) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &mut Plan) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let replaced = std::mem::replace(current, previous);
        self.future.push_front(replaced);
        true
    }

    /// Step forward. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, current: &mut Plan) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let replaced = std::mem::replace(current, next);
        self.past.push_back(replaced);
        self.trim();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Snapshots available to undo, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Plan> {
        self.past.iter()
    }

    /// Snapshots available to redo, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &Plan> {
        self.future.iter()
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }
}
