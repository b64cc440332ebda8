use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumDiscriminants, EnumIter};

use crate::artifacts::forest::{DecisionTreeParams, RandomForest, RandomForestParams};
use crate::artifacts::naive_bayes::{GaussianNaiveBayes, GaussianNaiveBayesParams};
use crate::artifacts::transform::{
    MinMaxScaler, MinMaxScalerParams, StandardScaler, StandardScalerParams,
};
use crate::artifacts::{Classifier, FeatureTransform};
use crate::error::ArtifactError;

/// On-disk form of a fitted transform: `{"type": ..., "params": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TransformKind))]
#[strum_discriminants(derive(EnumIter, Display))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TransformArtifact {
    MinMaxScaler(MinMaxScalerParams),
    StandardScaler(StandardScalerParams),
}

/// On-disk form of a fitted classifier.
#[derive(Debug, Clone, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ClassifierKind))]
#[strum_discriminants(derive(EnumIter, Display))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ClassifierArtifact {
    RandomForest(RandomForestParams),
    DecisionTree(DecisionTreeParams),
    GaussianNaiveBayes(GaussianNaiveBayesParams),
}

pub fn build_transform(
    artifact: TransformArtifact,
) -> Result<Box<dyn FeatureTransform>, ArtifactError> {
    match artifact {
        TransformArtifact::MinMaxScaler(p) => Ok(Box::new(MinMaxScaler::try_from(p)?)),
        TransformArtifact::StandardScaler(p) => Ok(Box::new(StandardScaler::try_from(p)?)),
    }
}

pub fn build_classifier(
    artifact: ClassifierArtifact,
) -> Result<Box<dyn Classifier>, ArtifactError> {
    match artifact {
        ClassifierArtifact::RandomForest(p) => Ok(Box::new(RandomForest::try_from(p)?)),
        ClassifierArtifact::DecisionTree(p) => Ok(Box::new(RandomForest::try_from(p)?)),
        ClassifierArtifact::GaussianNaiveBayes(p) => {
            Ok(Box::new(GaussianNaiveBayes::try_from(p)?))
        }
    }
}
