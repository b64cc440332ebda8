use crate::artifacts::{ArtifactPaths, Artifacts, Classifier, FeatureTransform, load_artifacts};
use crate::config::AppConfig;
use crate::core::{TRAINING_SCHEMA, TrainingSchema};
use crate::error::ArtifactError;
use crate::presentation::{ColorLegend, LabelMap, MapView};

/// Everything a request needs that never changes after startup.
///
/// Built once, then shared by reference (or `Arc`) with every session.
pub struct ModelContext {
    artifacts: Artifacts,
    labels: LabelMap,
    legend: ColorLegend,
    map_view: MapView,
}

impl ModelContext {
    pub fn new(
        artifacts: Artifacts,
        labels: LabelMap,
        legend: ColorLegend,
        map_view: MapView,
    ) -> Self {
        Self {
            artifacts,
            labels,
            legend,
            map_view,
        }
    }

    pub fn load(config: &AppConfig) -> Result<Self, ArtifactError> {
        let paths = ArtifactPaths::in_dir(
            &config.artifact_dir,
            &config.transform_file,
            &config.classifier_file,
        );
        let artifacts = load_artifacts(&paths, &TRAINING_SCHEMA)?;
        Ok(Self::new(
            artifacts,
            config.labels.clone(),
            config.legend.clone(),
            config.map.clone(),
        ))
    }

    /// The schema the artifacts were checked against at load.
    pub fn schema(&self) -> &TrainingSchema {
        &self.artifacts.schema
    }

    pub fn transform(&self) -> &dyn FeatureTransform {
        self.artifacts.transform.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.artifacts.classifier.as_ref()
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn legend(&self) -> &ColorLegend {
        &self.legend
    }

    pub fn map_view(&self) -> &MapView {
        &self.map_view
    }
}
