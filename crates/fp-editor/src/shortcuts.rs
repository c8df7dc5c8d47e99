//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser shell and native hosts agree on bindings.
//!
//! - ⌘/Ctrl+Z = undo
//! - ⌘/Ctrl+Shift+Z, ⌘/Ctrl+Y = redo
//! - Delete / Backspace = delete selection, unless typing in a text field

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// `meta` (⌘ on macOS) and `ctrl` both count as the command modifier.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// `editing_text` is true when focus is inside a text input, textarea
    /// or content-editable element; deletion is suppressed there so typing
    /// never removes plan entities.
    pub fn resolve(key: &str, modifiers: Modifiers, editing_text: bool) -> Option<ShortcutAction> {
        if modifiers.command() {
            let action = match key {
                "z" | "Z" if modifiers.shift => Some(ShortcutAction::Redo),
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
            if action.is_some() {
                return action;
            }
        }

        match key {
            "Delete" | "Backspace" if !editing_text => Some(ShortcutAction::Delete),
            _ => None,
        }
    }
}
