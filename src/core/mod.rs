pub mod axis_scale;
pub mod gap_bridge;
pub mod primitives;
pub mod projector;
pub mod range_selector;
pub mod resampler;
pub mod scale;
pub mod series;
pub mod step_ladder;
pub mod types;
pub mod value;

pub use axis_scale::AxisScale;
pub use gap_bridge::GapBridge;
pub use projector::{AxisMarker, Projector};
pub use range_selector::RangeSelector;
pub use resampler::{Resampled, moving_average, shrink};
pub use scale::LinearScale;
pub use series::{Series, SeriesAttributes, SeriesStats};
pub use step_ladder::StepLadder;
pub use types::{PixelPoint, Viewport};
pub use value::{RawValue, TypedValue, ValueKind, ValueType, infer_value};
