use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

use crate::core::{FeatureRecord, TrainingSchema};
use crate::presentation::{ColorLegend, LabelMap, RiskLabel};
use crate::session::{ResultStore, SessionResultState};

/// What one refresh cycle shows: the raw inputs and the current result.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub inputs: FeatureRecord,
    pub label: RiskLabel,
    pub color: String,
    pub confidence: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn present(
    record: &FeatureRecord,
    store: &ResultStore,
    labels: &LabelMap,
    legend: &ColorLegend,
) -> DisplayRecord {
    let state = store.state();
    let label = labels.resolve(&state);
    let color = legend.color_for(&label).to_string();
    let confidence = match state {
        SessionResultState::Predicted(p) => Some(p.confidence),
        SessionResultState::NotPredicted => None,
    };

    DisplayRecord {
        inputs: record.clone(),
        label,
        color,
        confidence,
        updated_at: store.updated_at(),
    }
}

impl DisplayRecord {
    /// Map rows for this record; empty when the inputs carry no coordinates.
    pub fn map_table(&self, schema: &TrainingSchema) -> MapTable {
        let (Some(lat), Some(long)) = (self.inputs.get("lat"), self.inputs.get("long")) else {
            return MapTable::default();
        };
        let features = schema
            .fields
            .iter()
            .filter_map(|f| self.inputs.get(f).map(|v| (f.to_string(), v)))
            .collect();

        MapTable {
            rows: vec![MapRow {
                lat,
                long,
                label: self.label.to_string(),
                color: self.color.clone(),
                features,
            }],
        }
    }
}

impl Display for DisplayRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "User Input Features (Raw)")?;
        for (name, value) in self.inputs.iter() {
            writeln!(f, "  {name:<10} {value:>10.2}")?;
        }
        write!(f, "Prediction Result: {} [{}]", self.label, self.color)?;
        if let Some(c) = self.confidence {
            write!(f, " confidence={:.1}%", c * 100.0)?;
        }
        if let Some(t) = self.updated_at {
            write!(f, " at {}", t.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapRow {
    pub lat: f64,
    pub long: f64,
    pub label: String,
    pub color: String,
    pub features: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapTable {
    pub rows: Vec<MapRow>,
}

impl MapTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
