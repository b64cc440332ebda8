use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::artifacts::{ArtifactKind, Classifier, check_row};
use crate::error::{ArtifactError, ModelError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNaiveBayesParams {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub classes: Vec<i64>,
    pub class_prior: Vec<f64>,
    /// Per-class feature means, `[class][feature]`.
    pub theta: Vec<Vec<f64>>,
    /// Per-class feature variances, `[class][feature]`.
    pub var: Vec<Vec<f64>>,
}

fn invalid(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        kind: ArtifactKind::Classifier,
        reason: reason.into(),
    }
}

/// Gaussian naive Bayes with per-class normal densities per feature.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    feature_names: Option<Vec<String>>,
    classes: Vec<i64>,
    log_prior: Vec<f64>,
    theta: Vec<Vec<f64>>,
    var: Vec<Vec<f64>>,
}

impl TryFrom<GaussianNaiveBayesParams> for GaussianNaiveBayes {
    type Error = ArtifactError;

    fn try_from(p: GaussianNaiveBayesParams) -> Result<Self, Self::Error> {
        let n_classes = p.classes.len();
        if n_classes == 0 {
            return Err(invalid("model has no classes"));
        }
        if p.class_prior.len() != n_classes || p.theta.len() != n_classes || p.var.len() != n_classes
        {
            return Err(invalid(format!(
                "{n_classes} classes but {} priors, {} mean rows, {} variance rows",
                p.class_prior.len(),
                p.theta.len(),
                p.var.len()
            )));
        }
        if let Some(c) = p.class_prior.iter().position(|v| !v.is_finite() || *v <= 0.0) {
            return Err(invalid(format!("prior of class index {c} is not positive")));
        }

        let n_features = p.theta[0].len();
        if n_features == 0 {
            return Err(invalid("model expects zero features"));
        }
        for c in 0..n_classes {
            if p.theta[c].len() != n_features || p.var[c].len() != n_features {
                return Err(invalid(format!("class index {c} has ragged parameters")));
            }
            if p.theta[c].iter().any(|m| !m.is_finite()) {
                return Err(invalid(format!("class index {c} has a non-finite mean")));
            }
            if p.var[c].iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(invalid(format!("class index {c} has a non-positive variance")));
            }
        }
        if let Some(names) = &p.feature_names {
            if names.len() != n_features {
                return Err(invalid(format!(
                    "{} feature names for {} features",
                    names.len(),
                    n_features
                )));
            }
        }

        Ok(Self {
            feature_names: p.feature_names,
            classes: p.classes,
            log_prior: p.class_prior.iter().map(|p| p.ln()).collect(),
            theta: p.theta,
            var: p.var,
        })
    }
}

impl GaussianNaiveBayes {
    fn joint_log_likelihood(&self, row: &[f64]) -> Vec<f64> {
        (0..self.classes.len())
            .map(|c| {
                let mut jll = self.log_prior[c];
                for (j, &x) in row.iter().enumerate() {
                    let var = self.var[c][j];
                    let diff = x - self.theta[c][j];
                    jll -= 0.5 * (2.0 * PI * var).ln() + diff * diff / (2.0 * var);
                }
                jll
            })
            .collect()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features(&self) -> usize {
        self.theta[0].len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Posterior class probabilities, normalized with log-sum-exp.
    fn get_votes_for_instance(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.n_features())?;
        let jll = self.joint_log_likelihood(row);
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}
