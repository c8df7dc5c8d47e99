pub mod editor;
pub mod history;
pub mod input;
pub mod shortcuts;
pub mod store;
pub mod tools;

pub use editor::{Editor, KeyOutcome};
pub use history::History;
pub use input::{InputEvent, Modifiers, PointerButton};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::Store;
pub use tools::{Action, DragSession, Interaction, ToolContext, ToolKind, WallEnd};
