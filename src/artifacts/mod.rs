mod choice;
pub mod classifier;
pub mod forest;
pub mod loader;
pub mod naive_bayes;
pub mod transform;

use strum_macros::Display;

use crate::error::ModelError;

pub use choice::{
    ClassifierArtifact, ClassifierKind, TransformArtifact, TransformKind, build_classifier,
    build_transform,
};
pub use classifier::Classifier;
pub use loader::{ArtifactPaths, Artifacts, load_artifacts};
pub use transform::FeatureTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactKind {
    Transform,
    Classifier,
}

/// Shared input guard for transforms and classifiers.
pub(crate) fn check_row(row: &[f64], expected: usize) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::ArityMismatch {
            expected,
            found: row.len(),
        });
    }
    if let Some(index) = row.iter().position(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_row_reports_arity_then_finiteness() {
        assert_eq!(
            check_row(&[1.0, 2.0], 3),
            Err(ModelError::ArityMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            check_row(&[1.0, f64::INFINITY, f64::NAN], 3),
            Err(ModelError::NonFinite { index: 1 })
        );
        assert!(check_row(&[0.0, 0.0, 0.0], 3).is_ok());
    }

    #[test]
    fn kind_names_are_lowercase() {
        assert_eq!(ArtifactKind::Transform.to_string(), "transform");
        assert_eq!(ArtifactKind::Classifier.to_string(), "classifier");
    }
}
