use std::fs;

use serde_json::json;
use tempfile::TempDir;

use crate::artifacts::{ArtifactPaths, load_artifacts};
use crate::core::TRAINING_SCHEMA;
use crate::error::ArtifactError;
use crate::pipeline::ModelContext;
use crate::presentation::{ColorLegend, LabelMap, MapView};

pub const TRANSFORM_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Min-max scaler fit on the control ranges of temp, humidity and windspeed.
pub fn min_max_transform_json() -> String {
    json!({
        "type": "min-max-scaler",
        "params": {
            "feature_names": ["temp", "humidity", "windspeed"],
            "data_min": [-10.0, 0.0, 0.0],
            "data_max": [50.0, 100.0, 50.0]
        }
    })
    .to_string()
}

/// Three stumps over scaled inputs: dry, hot and windy each vote for class 1.
pub fn forest_classifier_json() -> String {
    json!({
        "type": "random-forest",
        "params": {
            "feature_names": ["temp", "humidity", "windspeed"],
            "n_features": 3,
            "classes": [0, 1],
            "trees": [
                { "nodes": [
                    { "feature": 1, "threshold": 0.3, "left": 1, "right": 2 },
                    { "value": [1.0, 4.0] },
                    { "value": [5.0, 0.0] }
                ]},
                { "nodes": [
                    { "feature": 0, "threshold": 0.6, "left": 1, "right": 2 },
                    { "value": [4.0, 1.0] },
                    { "value": [1.0, 4.0] }
                ]},
                { "nodes": [
                    { "feature": 2, "threshold": 0.5, "left": 1, "right": 2 },
                    { "value": [3.0, 1.0] },
                    { "value": [0.0, 4.0] }
                ]}
            ]
        }
    })
    .to_string()
}

pub fn naive_bayes_classifier_json() -> String {
    json!({
        "type": "gaussian-naive-bayes",
        "params": {
            "feature_names": ["temp", "humidity", "windspeed"],
            "classes": [0, 1],
            "class_prior": [0.6, 0.4],
            "theta": [[0.4, 0.6, 0.3], [0.8, 0.15, 0.7]],
            "var": [[0.02, 0.02, 0.02], [0.02, 0.02, 0.02]]
        }
    })
    .to_string()
}

/// A throwaway artifact directory holding one transform and one classifier file.
pub struct ArtifactDir {
    dir: TempDir,
}

impl ArtifactDir {
    pub fn new(transform: &str, classifier: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TRANSFORM_FILE), transform).unwrap();
        fs::write(dir.path().join(CLASSIFIER_FILE), classifier).unwrap();
        Self { dir }
    }

    pub fn with_defaults() -> Self {
        Self::new(&min_max_transform_json(), &forest_classifier_json())
    }

    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(self.dir.path(), TRANSFORM_FILE, CLASSIFIER_FILE)
    }
}

pub fn context_from_json(transform: &str, classifier: &str) -> Result<ModelContext, ArtifactError> {
    let dir = ArtifactDir::new(transform, classifier);
    let artifacts = load_artifacts(&dir.paths(), &TRAINING_SCHEMA)?;
    Ok(ModelContext::new(
        artifacts,
        LabelMap::default(),
        ColorLegend::default(),
        MapView::default(),
    ))
}

/// Context over the default scaler and forest with the stock labels and colors.
pub fn test_context() -> ModelContext {
    context_from_json(&min_max_transform_json(), &forest_classifier_json()).unwrap()
}
