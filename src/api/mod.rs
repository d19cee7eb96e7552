mod chart_model;
mod chart_options;
mod delimited_input;
mod json_contract;
mod pipeline;

pub use chart_model::Chart;
pub use chart_options::{
    ChartOptions, DEFAULT_AXIS_AREA_WIDTH, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH,
};
pub use delimited_input::{detect_delimiter, read_chart, read_chart_file, read_chart_str};
pub use json_contract::{CHART_FRAME_JSON_SCHEMA_V1, ChartFrameJsonContractV1};
pub use pipeline::ChartPipeline;
