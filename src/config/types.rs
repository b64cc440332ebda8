use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::presentation::{ColorLegend, LabelMap, MapView};

pub(super) const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub(super) const DEFAULT_TRANSFORM_FILE: &str = "scaler.json";
pub(super) const DEFAULT_CLASSIFIER_FILE: &str = "classifier.json";
pub(super) const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    #[schemars(
        with = "String",
        title = "Artifact Directory",
        description = "Directory holding the fitted transform and classifier"
    )]
    pub artifact_dir: PathBuf,

    #[schemars(title = "Transform File", description = "Transform artifact file name")]
    pub transform_file: String,

    #[schemars(title = "Classifier File", description = "Classifier artifact file name")]
    pub classifier_file: String,

    #[schemars(title = "Labels", description = "Class code to risk label")]
    pub labels: LabelMap,

    #[schemars(title = "Legend", description = "Risk label to marker color")]
    pub legend: ColorLegend,

    #[schemars(title = "Map", description = "Map view settings")]
    pub map: MapView,

    #[schemars(
        with = "String",
        title = "Export Directory",
        description = "Where exported GeoJSON maps are written"
    )]
    pub export_dir: PathBuf,

    #[schemars(
        title = "Log Filter",
        description = "tracing filter directive, e.g. `info` or `firerisk=debug`"
    )]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            transform_file: DEFAULT_TRANSFORM_FILE.to_string(),
            classifier_file: DEFAULT_CLASSIFIER_FILE.to_string(),
            labels: LabelMap::default(),
            legend: ColorLegend::default(),
            map: MapView::default(),
            export_dir: PathBuf::from("."),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
