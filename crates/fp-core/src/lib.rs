pub mod config;
pub mod generator;
pub mod geometry;
pub mod id;
pub mod io;
pub mod model;
pub mod snap;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use generator::{GeneratorInput, HouseStyle, generate_plan};
pub use geometry::{Bounds, Vec2};
pub use id::EntityId;
pub use io::{ImportError, export_plan, import_plan};
pub use model::*;
pub use snap::{SnapHit, SnapKind, SnapTargets};
pub use viewport::Viewport;
