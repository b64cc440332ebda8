use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::artifacts::{
    ArtifactKind, Classifier, ClassifierArtifact, ClassifierKind, FeatureTransform,
    TransformArtifact, TransformKind, build_classifier, build_transform,
};
use crate::core::TrainingSchema;
use crate::error::ArtifactError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub transform: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(dir: &Path, transform_file: &str, classifier_file: &str) -> Self {
        Self {
            transform: dir.join(transform_file),
            classifier: dir.join(classifier_file),
        }
    }
}

/// The fitted pair, validated against each other and the training schema.
///
/// Only [`load_artifacts`] builds one, so holding it means the check passed.
pub struct Artifacts {
    pub(crate) transform: Box<dyn FeatureTransform>,
    pub(crate) classifier: Box<dyn Classifier>,
    pub(crate) schema: TrainingSchema,
}

/// Loads both artifacts or neither. Nothing is retried.
pub fn load_artifacts(
    paths: &ArtifactPaths,
    schema: &TrainingSchema,
) -> Result<Artifacts, ArtifactError> {
    let transform_art: TransformArtifact = read_artifact(ArtifactKind::Transform, &paths.transform)?;
    let classifier_art: ClassifierArtifact =
        read_artifact(ArtifactKind::Classifier, &paths.classifier)?;

    let transform_kind = TransformKind::from(&transform_art);
    let classifier_kind = ClassifierKind::from(&classifier_art);

    let transform = build_transform(transform_art)?;
    let classifier = build_classifier(classifier_art)?;
    check_compatibility(transform.as_ref(), classifier.as_ref(), schema)?;

    info!(
        transform = %transform_kind,
        classifier = %classifier_kind,
        features = transform.n_features_in(),
        classes = classifier.classes().len(),
        schema = schema.name,
        schema_version = schema.version,
        "artifacts loaded"
    );

    Ok(Artifacts {
        transform,
        classifier,
        schema: *schema,
    })
}

fn read_artifact<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ArtifactError::Missing {
            kind,
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Unreadable {
            kind,
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Transform width, classifier width and stored feature names must all agree
/// with `schema`.
fn check_compatibility(
    transform: &dyn FeatureTransform,
    classifier: &dyn Classifier,
    schema: &TrainingSchema,
) -> Result<(), ArtifactError> {
    if transform.n_features_in() != schema.len() {
        return Err(ArtifactError::Incompatible {
            reason: format!(
                "transform expects {} inputs, schema '{}' v{} has {}",
                transform.n_features_in(),
                schema.name,
                schema.version,
                schema.len()
            ),
        });
    }
    if transform.n_features_out() != classifier.n_features() {
        return Err(ArtifactError::Incompatible {
            reason: format!(
                "transform outputs {} values, classifier expects {}",
                transform.n_features_out(),
                classifier.n_features()
            ),
        });
    }

    let stored = [
        (ArtifactKind::Transform, transform.feature_names()),
        (ArtifactKind::Classifier, classifier.feature_names()),
    ];
    for (kind, names) in stored {
        if let Some(names) = names {
            if !schema.matches(names) {
                return Err(ArtifactError::Incompatible {
                    reason: format!(
                        "{kind} was fit on {:?}, schema '{}' v{} is {:?}",
                        names, schema.name, schema.version, schema.fields
                    ),
                });
            }
        }
    }
    Ok(())
}
