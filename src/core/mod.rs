pub mod mapping;
pub mod nice;
pub mod rotation;
pub mod scale;
pub mod ticks;
pub mod types;
pub mod view;

pub use mapping::{AxisTransform, ScreenWindow, inv_map_2d, map_2d};
pub use nice::{exp10, nice_number};
pub use rotation::{RotatedBox, rotated_bounding_box};
pub use scale::{
    AxisRange, AxisScale, BoundPolicy, DataRange, ScaleRequest, scale_linear, scale_log,
};
pub use ticks::{
    LOG_DECADE_TABLE, MAX_TICKS, TickStep, TickSweep, ceil_to_multiple, floor_to_multiple,
    generate_ticks, round_to_multiple,
};
pub use types::{AxisClass, MarginSide, Orientation, Padding, PlotRect, Point, Viewport};
pub use view::{PAGE_FRACTION, ScrollCommand, ScrollRegion, ViewFractions, adjust_viewport};
