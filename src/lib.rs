//! powerchart: chart data-transformation pipeline for power telemetry.
//!
//! Raw rows become typed [`core::Series`]; gap bridging, smoothing,
//! extrema-preserving downsampling and outlier-trimmed range selection
//! prepare them, and the projector turns them into a [`render::ChartFrame`]
//! of axis markers, pixel polylines and legend rows for a renderer.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartOptions, ChartPipeline};
pub use error::{ChartError, ChartResult, ErrorLog};
