use anyhow::{Context, Result, anyhow, bail};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered feature names the transform and classifier were fit on.
///
/// Both the projector and the pipeline entry check read this, and the
/// artifact loader compares it against the names stored in each artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSchema {
    pub name: &'static str,
    pub version: u32,
    pub fields: &'static [&'static str],
}

pub const TRAINING_SCHEMA: TrainingSchema = TrainingSchema {
    name: "weather-fire-risk",
    version: 1,
    fields: &["temp", "humidity", "windspeed"],
};

impl TrainingSchema {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.to_string()).collect()
    }

    /// Exact, order-sensitive comparison.
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.len() == self.fields.len()
            && names
                .iter()
                .zip(self.fields.iter())
                .all(|(a, b)| a.as_ref() == *b)
    }
}

fn default_temp() -> f64 {
    20.0
}

fn default_humidity() -> f64 {
    50.0
}

fn default_windspeed() -> f64 {
    15.0
}

fn default_lat() -> f64 {
    50.0
}

fn default_long() -> f64 {
    -124.0
}

/// The user-facing controls. Declaration order is the display order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WeatherInputs {
    #[serde(default = "default_temp")]
    #[schemars(
        title = "temp",
        description = "Air temperature (°C)",
        range(min = -10.0, max = 50.0),
        default = "default_temp"
    )]
    pub temp: f64,

    #[serde(default = "default_humidity")]
    #[schemars(
        title = "humidity",
        description = "Relative humidity (%)",
        range(min = 0.0, max = 100.0),
        default = "default_humidity"
    )]
    pub humidity: f64,

    #[serde(default = "default_windspeed")]
    #[schemars(
        title = "windspeed",
        description = "Wind speed (km/h)",
        range(min = 0.0, max = 50.0),
        default = "default_windspeed"
    )]
    pub windspeed: f64,

    #[serde(default = "default_lat")]
    #[schemars(
        title = "lat",
        description = "Marker latitude (display only)",
        range(min = -90.0, max = 90.0),
        default = "default_lat"
    )]
    pub lat: f64,

    #[serde(default = "default_long")]
    #[schemars(
        title = "long",
        description = "Marker longitude (display only)",
        range(min = -180.0, max = 180.0),
        default = "default_long"
    )]
    pub long: f64,
}

impl Default for WeatherInputs {
    fn default() -> Self {
        Self {
            temp: default_temp(),
            humidity: default_humidity(),
            windspeed: default_windspeed(),
            lat: default_lat(),
            long: default_long(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Model,
    Display,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputFieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub role: FieldRole,
}

impl InputFieldSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

/// Numeric control specs for [`WeatherInputs`], in declaration order.
pub fn input_field_specs(training: &TrainingSchema) -> Result<Vec<InputFieldSpec>> {
    let schema: Schema = schema_for!(WeatherInputs);
    let defaults = serde_json::to_value(WeatherInputs::default())?;
    specs_from_schema(&schema, &defaults, training)
}

fn specs_from_schema(
    root: &Schema,
    defaults: &Value,
    training: &TrainingSchema,
) -> Result<Vec<InputFieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let props = root_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .context("input schema has no properties")?;

    let mut out = Vec::with_capacity(props.len());
    for (name, field_schema) in props {
        let fs_obj = field_schema
            .as_object()
            .context("field schema not object")?;

        if !is_number(fs_obj) {
            bail!("input field '{name}' is not numeric");
        }

        let min = fs_obj
            .get("minimum")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow!("input field '{name}' has no minimum"))?;
        let max = fs_obj
            .get("maximum")
            .and_then(|v| v.as_f64())
            .ok_or_else(|| anyhow!("input field '{name}' has no maximum"))?;
        if min > max {
            bail!("input field '{name}' has min {min} > max {max}");
        }

        let default = fs_obj
            .get("default")
            .and_then(|v| v.as_f64())
            .or_else(|| defaults.get(name).and_then(|v| v.as_f64()))
            .ok_or_else(|| anyhow!("input field '{name}' has no default"))?;

        let title = fs_obj
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();

        let description = fs_obj
            .get("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let role = if training.contains(name) {
            FieldRole::Model
        } else {
            FieldRole::Display
        };

        out.push(InputFieldSpec {
            name: name.clone(),
            title,
            description,
            min,
            max,
            default: default.clamp(min, max),
            role,
        });
    }

    Ok(out)
}

fn is_number(obj: &Map<String, Value>) -> bool {
    match obj.get("type") {
        Some(Value::String(s)) => s == "number",
        Some(Value::Array(arr)) => arr.iter().any(|v| v.as_str() == Some("number")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_follow_declaration_order() {
        let specs = input_field_specs(&TRAINING_SCHEMA).unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["temp", "humidity", "windspeed", "lat", "long"]);
    }

    #[test]
    fn ranges_and_defaults_come_from_schema() {
        let specs = input_field_specs(&TRAINING_SCHEMA).unwrap();
        let temp = &specs[0];
        assert_eq!(temp.min, -10.0);
        assert_eq!(temp.max, 50.0);
        assert_eq!(temp.default, 20.0);

        let long = &specs[4];
        assert_eq!(long.min, -180.0);
        assert_eq!(long.max, 180.0);
        assert_eq!(long.default, -124.0);
    }

    #[test]
    fn coordinates_are_display_only() {
        let specs = input_field_specs(&TRAINING_SCHEMA).unwrap();
        for s in &specs {
            let expected = if s.name == "lat" || s.name == "long" {
                FieldRole::Display
            } else {
                FieldRole::Model
            };
            assert_eq!(s.role, expected, "role for {}", s.name);
        }
    }

    #[test]
    fn clamp_keeps_values_in_range() {
        let specs = input_field_specs(&TRAINING_SCHEMA).unwrap();
        let humidity = &specs[1];
        assert_eq!(humidity.clamp(150.0), 100.0);
        assert_eq!(humidity.clamp(-3.0), 0.0);
        assert_eq!(humidity.clamp(42.5), 42.5);
        assert_eq!(humidity.clamp(f64::NAN), 50.0);
    }

    #[test]
    fn training_schema_match_is_order_sensitive() {
        assert!(TRAINING_SCHEMA.matches(&["temp", "humidity", "windspeed"]));
        assert!(!TRAINING_SCHEMA.matches(&["humidity", "temp", "windspeed"]));
        assert!(!TRAINING_SCHEMA.matches(&["temp", "humidity"]));
        assert!(!TRAINING_SCHEMA.matches(&["Feature 1", "Feature 2", "Feature 3"]));
    }
}
