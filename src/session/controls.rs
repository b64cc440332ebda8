use anyhow::Result;

use crate::core::schema::FieldRole;
use crate::core::{FeatureRecord, InputFieldSpec, TrainingSchema, WeatherInputs, input_field_specs};
use crate::error::RecordError;

/// Current value of every numeric input control.
///
/// Setting a value clamps it to the field's declared range, so an
/// out-of-range value never reaches a [`FeatureRecord`].
#[derive(Debug, Clone)]
pub struct ControlPanel {
    specs: Vec<InputFieldSpec>,
    values: Vec<f64>,
}

impl ControlPanel {
    pub fn new(training: &TrainingSchema) -> Result<Self> {
        let specs = input_field_specs(training)?;
        let values = specs.iter().map(|s| s.default).collect();
        Ok(Self { specs, values })
    }

    pub fn specs(&self) -> &[InputFieldSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let idx = self.specs.iter().position(|s| s.name == name)?;
        Some(self.values[idx])
    }

    /// Stores `value` clamped to range and returns what was stored.
    pub fn set(&mut self, name: &str, value: f64) -> Result<f64, RecordError> {
        let idx = self
            .specs
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        let stored = self.specs[idx].clamp(value);
        self.values[idx] = stored;
        Ok(stored)
    }

    pub fn apply(&mut self, inputs: &WeatherInputs) -> Result<(), RecordError> {
        self.set("temp", inputs.temp)?;
        self.set("humidity", inputs.humidity)?;
        self.set("windspeed", inputs.windspeed)?;
        self.set("lat", inputs.lat)?;
        self.set("long", inputs.long)?;
        Ok(())
    }

    pub fn display_only_fields(&self) -> impl Iterator<Item = &str> {
        self.specs
            .iter()
            .filter(|s| s.role == FieldRole::Display)
            .map(|s| s.name.as_str())
    }

    /// Snapshot of the controls for this refresh cycle.
    pub fn collect(&self) -> FeatureRecord {
        FeatureRecord::from_unique(
            self.specs
                .iter()
                .zip(self.values.iter())
                .map(|(s, v)| (s.name.clone(), *v))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TRAINING_SCHEMA;

    #[test]
    fn collects_defaults_in_control_order() {
        let panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        let r = panel.collect();
        assert_eq!(r.names(), vec!["temp", "humidity", "windspeed", "lat", "long"]);
        assert_eq!(r.get("temp"), Some(20.0));
        assert_eq!(r.get("humidity"), Some(50.0));
        assert_eq!(r.get("windspeed"), Some(15.0));
    }

    #[test]
    fn set_clamps_to_range() {
        let mut panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        assert_eq!(panel.set("windspeed", 80.0).unwrap(), 50.0);
        assert_eq!(panel.set("lat", -100.0).unwrap(), -90.0);
        let r = panel.collect();
        assert_eq!(r.get("windspeed"), Some(50.0));
        assert_eq!(r.get("lat"), Some(-90.0));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        let err = panel.set("Feature 1", 1.0).unwrap_err();
        assert!(matches!(err, RecordError::UnknownField(n) if n == "Feature 1"));
    }

    #[test]
    fn collect_is_a_pure_snapshot() {
        let mut panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        let before = panel.collect();
        let again = panel.collect();
        assert_eq!(before, again);
        panel.set("temp", 30.0).unwrap();
        assert_eq!(before.get("temp"), Some(20.0));
        assert_eq!(panel.collect().get("temp"), Some(30.0));
    }

    #[test]
    fn apply_copies_and_clamps_every_field() {
        let mut panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        panel
            .apply(&WeatherInputs {
                temp: 99.0,
                humidity: 10.0,
                windspeed: 5.0,
                lat: 40.0,
                long: -120.0,
            })
            .unwrap();
        let r = panel.collect();
        assert_eq!(r.get("temp"), Some(50.0));
        assert_eq!(r.get("humidity"), Some(10.0));
        assert_eq!(r.get("long"), Some(-120.0));
    }

    #[test]
    fn apply_clamps_non_finite_values() {
        let mut panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        panel
            .apply(&WeatherInputs {
                temp: f64::NEG_INFINITY,
                windspeed: f64::INFINITY,
                humidity: f64::NAN,
                ..WeatherInputs::default()
            })
            .unwrap();
        assert_eq!(panel.get("temp"), Some(-10.0));
        assert_eq!(panel.get("windspeed"), Some(50.0));
        assert_eq!(panel.get("humidity"), Some(50.0));
    }

    #[test]
    fn coordinates_are_the_display_only_fields() {
        let panel = ControlPanel::new(&TRAINING_SCHEMA).unwrap();
        let fields: Vec<&str> = panel.display_only_fields().collect();
        assert_eq!(fields, vec!["lat", "long"]);
    }
}
