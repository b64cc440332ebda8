use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactKind, check_row};
use crate::error::{ArtifactError, ModelError};

/// A rescaling step fit at training time and replayed at inference time.
pub trait FeatureTransform: Send + Sync {
    fn feature_names(&self) -> Option<&[String]>;
    fn n_features_in(&self) -> usize;
    fn n_features_out(&self) -> usize;
    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
    #[serde(default = "default_feature_range")]
    pub feature_range: (f64, f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScalerParams {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

fn invalid(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        kind: ArtifactKind::Transform,
        reason: reason.into(),
    }
}

fn check_names(names: &Option<Vec<String>>, width: usize) -> Result<(), ArtifactError> {
    match names {
        Some(n) if n.len() != width => Err(invalid(format!(
            "{} feature names for {} columns",
            n.len(),
            width
        ))),
        _ => Ok(()),
    }
}

/// `x * scale + offset` per column; a constant column gets scale 1.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    feature_names: Option<Vec<String>>,
    scale: Vec<f64>,
    offset: Vec<f64>,
}

impl TryFrom<MinMaxScalerParams> for MinMaxScaler {
    type Error = ArtifactError;

    fn try_from(p: MinMaxScalerParams) -> Result<Self, Self::Error> {
        let width = p.data_min.len();
        if width == 0 {
            return Err(invalid("min-max scaler has no columns"));
        }
        if p.data_max.len() != width {
            return Err(invalid(format!(
                "data_min has {} columns, data_max has {}",
                width,
                p.data_max.len()
            )));
        }
        check_names(&p.feature_names, width)?;

        let (lo, hi) = p.feature_range;
        if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
            return Err(invalid(format!("bad feature_range ({lo}, {hi})")));
        }

        let mut scale = Vec::with_capacity(width);
        let mut offset = Vec::with_capacity(width);
        for (i, (&min, &max)) in p.data_min.iter().zip(p.data_max.iter()).enumerate() {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(invalid(format!("column {i} has bounds [{min}, {max}]")));
            }
            let range = max - min;
            let s = if range == 0.0 { 1.0 } else { (hi - lo) / range };
            scale.push(s);
            offset.push(lo - min * s);
        }

        Ok(Self {
            feature_names: p.feature_names,
            scale,
            offset,
        })
    }
}

impl FeatureTransform for MinMaxScaler {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features_in(&self) -> usize {
        self.scale.len()
    }

    fn n_features_out(&self) -> usize {
        self.scale.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.scale.len())?;
        Ok(row
            .iter()
            .zip(self.scale.iter().zip(self.offset.iter()))
            .map(|(x, (s, o))| x * s + o)
            .collect())
    }
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    feature_names: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<StandardScalerParams> for StandardScaler {
    type Error = ArtifactError;

    fn try_from(p: StandardScalerParams) -> Result<Self, Self::Error> {
        let width = p.mean.len();
        if width == 0 {
            return Err(invalid("standard scaler has no columns"));
        }
        if p.scale.len() != width {
            return Err(invalid(format!(
                "mean has {} columns, scale has {}",
                width,
                p.scale.len()
            )));
        }
        check_names(&p.feature_names, width)?;
        if let Some(i) = p.mean.iter().position(|m| !m.is_finite()) {
            return Err(invalid(format!("mean of column {i} is not finite")));
        }
        if let Some(i) = p.scale.iter().position(|s| !s.is_finite() || *s == 0.0) {
            return Err(invalid(format!("scale of column {i} is zero or not finite")));
        }

        Ok(Self {
            feature_names: p.feature_names,
            mean: p.mean,
            scale: p.scale,
        })
    }
}

impl FeatureTransform for StandardScaler {
    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn n_features_in(&self) -> usize {
        self.mean.len()
    }

    fn n_features_out(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row(row, self.mean.len())?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS
    }

    fn min_max(min: Vec<f64>, max: Vec<f64>) -> MinMaxScaler {
        MinMaxScaler::try_from(MinMaxScalerParams {
            feature_names: None,
            data_min: min,
            data_max: max,
            feature_range: (0.0, 1.0),
        })
        .unwrap()
    }

    #[test]
    fn min_max_maps_bounds_to_unit_range() {
        let s = min_max(vec![-10.0, 0.0, 0.0], vec![50.0, 100.0, 50.0]);
        let lo = s.transform(&[-10.0, 0.0, 0.0]).unwrap();
        let hi = s.transform(&[50.0, 100.0, 50.0]).unwrap();
        let mid = s.transform(&[20.0, 50.0, 15.0]).unwrap();
        assert!(lo.iter().all(|v| approx_eq(*v, 0.0)));
        assert!(hi.iter().all(|v| approx_eq(*v, 1.0)));
        assert!(approx_eq(mid[0], 0.5));
        assert!(approx_eq(mid[1], 0.5));
        assert!(approx_eq(mid[2], 0.3));
    }

    #[test]
    fn min_max_constant_column_uses_unit_scale() {
        let s = min_max(vec![5.0], vec![5.0]);
        let out = s.transform(&[7.0]).unwrap();
        assert!(approx_eq(out[0], 2.0));
    }

    #[test]
    fn min_max_custom_range() {
        let s = MinMaxScaler::try_from(MinMaxScalerParams {
            feature_names: None,
            data_min: vec![0.0],
            data_max: vec![10.0],
            feature_range: (-1.0, 1.0),
        })
        .unwrap();
        assert!(approx_eq(s.transform(&[5.0]).unwrap()[0], 0.0));
        assert!(approx_eq(s.transform(&[10.0]).unwrap()[0], 1.0));
    }

    #[test]
    fn min_max_rejects_bad_params() {
        let err = MinMaxScaler::try_from(MinMaxScalerParams {
            feature_names: None,
            data_min: vec![0.0, 1.0],
            data_max: vec![1.0],
            feature_range: (0.0, 1.0),
        })
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));

        let err = MinMaxScaler::try_from(MinMaxScalerParams {
            feature_names: Some(vec!["temp".into()]),
            data_min: vec![0.0, 1.0],
            data_max: vec![1.0, 2.0],
            feature_range: (0.0, 1.0),
        })
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));

        let err = MinMaxScaler::try_from(MinMaxScalerParams {
            feature_names: None,
            data_min: vec![3.0],
            data_max: vec![1.0],
            feature_range: (0.0, 1.0),
        })
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }

    #[test]
    fn transform_rejects_wrong_arity_and_nan() {
        let s = min_max(vec![0.0, 0.0], vec![1.0, 1.0]);
        assert_eq!(
            s.transform(&[0.5]),
            Err(ModelError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            s.transform(&[0.5, f64::NAN]),
            Err(ModelError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn standard_scaler_centers_and_scales() {
        let s = StandardScaler::try_from(StandardScalerParams {
            feature_names: None,
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 4.0],
        })
        .unwrap();
        let out = s.transform(&[14.0, -2.0]).unwrap();
        assert!(approx_eq(out[0], 2.0));
        assert!(approx_eq(out[1], -0.5));
    }

    #[test]
    fn standard_scaler_rejects_zero_scale() {
        let err = StandardScaler::try_from(StandardScalerParams {
            feature_names: None,
            mean: vec![0.0],
            scale: vec![0.0],
        })
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }
}
