use crate::core::{FeatureRecord, ModelFeatureVector, TrainingSchema};
use crate::error::SchemaMismatch;

/// Picks exactly the training fields out of `record`, in training order.
///
/// Extra fields are dropped. Missing fields are an error; nothing is renamed,
/// reordered to fit, or filled in.
pub fn project(
    record: &FeatureRecord,
    schema: &TrainingSchema,
) -> Result<ModelFeatureVector, SchemaMismatch> {
    let mut values = Vec::with_capacity(schema.len());
    let mut missing = Vec::new();

    for field in schema.fields {
        match record.get(field) {
            Some(v) => values.push(v),
            None => missing.push(field.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(SchemaMismatch {
            expected: schema.field_names(),
            found: record.names(),
            missing,
        });
    }

    Ok(ModelFeatureVector::from_parts(schema.field_names(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TRAINING_SCHEMA;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    fn full_record() -> Vec<(&'static str, f64)> {
        vec![
            ("temp", 20.0),
            ("humidity", 50.0),
            ("windspeed", 15.0),
            ("lat", 50.0),
            ("long", -124.0),
        ]
    }

    #[test]
    fn projects_training_fields_in_order() {
        let r = FeatureRecord::new(full_record()).unwrap();
        let v = project(&r, &TRAINING_SCHEMA).unwrap();
        assert_eq!(v.values(), &[20.0, 50.0, 15.0]);
        assert_eq!(v.names(), &["temp", "humidity", "windspeed"]);
    }

    #[test]
    fn output_order_ignores_record_order() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut fields = full_record();
            fields.shuffle(&mut rng);
            let r = FeatureRecord::new(fields).unwrap();
            let v = project(&r, &TRAINING_SCHEMA).unwrap();
            assert_eq!(v.values(), &[20.0, 50.0, 15.0]);
            assert!(TRAINING_SCHEMA.matches(v.names()));
        }
    }

    #[test]
    fn coordinates_never_reach_the_vector() {
        let r = FeatureRecord::new(full_record()).unwrap();
        let v = project(&r, &TRAINING_SCHEMA).unwrap();
        assert_eq!(v.len(), 3);
        assert!(!v.names().iter().any(|n| n == "lat" || n == "long"));
    }

    #[test]
    fn generic_column_names_are_a_mismatch() {
        let r = FeatureRecord::new([("Feature 1", 20.0), ("Feature 2", 50.0), ("Feature 3", 15.0)])
            .unwrap();
        let err = project(&r, &TRAINING_SCHEMA).unwrap_err();
        assert_eq!(err.missing, vec!["temp", "humidity", "windspeed"]);
        assert_eq!(err.found, vec!["Feature 1", "Feature 2", "Feature 3"]);
        assert_eq!(err.expected, TRAINING_SCHEMA.field_names());
    }

    #[test]
    fn partial_record_reports_only_missing_fields() {
        let r = FeatureRecord::new([("temp", 20.0), ("windspeed", 15.0)]).unwrap();
        let err = project(&r, &TRAINING_SCHEMA).unwrap_err();
        assert_eq!(err.missing, vec!["humidity"]);
    }
}
