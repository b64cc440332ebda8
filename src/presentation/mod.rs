mod display;
mod labels;
mod legend;
mod map;

pub use display::{DisplayRecord, MapRow, MapTable, present};
pub use labels::{LabelMap, NOT_PREDICTED, RiskLabel, UNKNOWN};
pub use legend::{ColorLegend, DEFAULT_COLOR};
pub use map::{GeoJsonMapSink, MapSink, MapView, TextMapSink};
