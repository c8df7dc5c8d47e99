pub mod frame;
pub mod hit;
pub mod paint;

pub use frame::{DrawCmd, Frame, LineCap, Preview, Rgba, Theme, render_frame};
pub use hit::{body_contains, handle_at, hit_test, hit_test_rect};
pub use paint::paint_frame;
