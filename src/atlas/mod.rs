pub mod color_ramp;
pub mod frame;
pub mod hit_test;
pub mod legend;
pub mod map_window;
pub mod projection;
pub mod record;
pub mod tooltip;

pub use color_ramp::ColorRamp;
pub use frame::{Dot, FrameCompositor, FrameInput, FramePlan};
pub use hit_test::{Hover, find_hover};
pub use map_window::MapWindow;
pub use projection::{Projector, Viewport, layout_viewport, linear_map};
pub use record::PointRecord;
