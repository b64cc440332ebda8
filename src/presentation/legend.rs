use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::presentation::RiskLabel;

pub const DEFAULT_COLOR: &str = "gray";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_colors() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("High".to_string(), "red".to_string()),
        ("Low".to_string(), "green".to_string()),
    ])
}

/// Label → marker color. Anything not listed gets `default_color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColorLegend {
    #[serde(default = "default_colors")]
    #[schemars(
        title = "Colors",
        description = "Marker color per risk label",
        default = "default_colors"
    )]
    pub colors: BTreeMap<String, String>,

    #[serde(default = "default_color")]
    #[schemars(
        title = "Default Color",
        description = "Color for labels not listed above",
        default = "default_color"
    )]
    pub default_color: String,
}

impl Default for ColorLegend {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            default_color: default_color(),
        }
    }
}

impl ColorLegend {
    pub fn color_for(&self, label: &RiskLabel) -> &str {
        self.colors
            .get(label.as_str())
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
