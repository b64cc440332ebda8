pub mod prediction;
pub mod record;
pub mod schema;

pub use prediction::Prediction;
pub use record::{FeatureRecord, ModelFeatureVector};
pub use schema::{InputFieldSpec, TRAINING_SCHEMA, TrainingSchema, WeatherInputs, input_field_specs};
