use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::session::SessionResultState;

pub const NOT_PREDICTED: &str = "Not Predicted";
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLabel {
    NotPredicted,
    Known(String),
    /// Class code the label map has no entry for.
    Unknown { code: i64 },
}

impl RiskLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLabel::NotPredicted => NOT_PREDICTED,
            RiskLabel::Known(s) => s,
            RiskLabel::Unknown { .. } => UNKNOWN,
        }
    }
}

impl Display for RiskLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed class code → risk label mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LabelMap(BTreeMap<i64, String>);

impl Default for LabelMap {
    fn default() -> Self {
        Self(BTreeMap::from([(0, "Low".to_string()), (1, "High".to_string())]))
    }
}

impl LabelMap {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn has_label(&self, code: i64) -> bool {
        self.0.contains_key(&code)
    }

    pub fn label_for(&self, code: i64) -> RiskLabel {
        match self.0.get(&code) {
            Some(label) => RiskLabel::Known(label.clone()),
            None => RiskLabel::Unknown { code },
        }
    }

    pub fn resolve(&self, state: &SessionResultState) -> RiskLabel {
        match state {
            SessionResultState::NotPredicted => RiskLabel::NotPredicted,
            SessionResultState::Predicted(p) => self.label_for(p.code),
        }
    }
}
