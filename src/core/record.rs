use serde::Serialize;

use crate::error::RecordError;

/// One row of user input captured during a single refresh cycle.
///
/// Field order is whatever the producer used; consumers look fields up by
/// name. Names are unique. There is no mutable access once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    fields: Vec<(String, f64)>,
}

impl FeatureRecord {
    pub fn new<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, f64)>,
    ) -> Result<Self, RecordError> {
        let mut out: Vec<(String, f64)> = Vec::new();
        for (name, value) in fields {
            let name = name.into();
            if out.iter().any(|(n, _)| *n == name) {
                return Err(RecordError::DuplicateField(name));
            }
            out.push((name, value));
        }
        Ok(Self { fields: out })
    }

    /// Caller guarantees unique names.
    pub(crate) fn from_unique(fields: Vec<(String, f64)>) -> Self {
        debug_assert!(
            fields
                .iter()
                .enumerate()
                .all(|(i, (n, _))| fields[..i].iter().all(|(m, _)| m != n))
        );
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Strict, ordered projection of a [`FeatureRecord`] onto the training schema.
///
/// Only the projector builds these, so `names` always lines up with `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl ModelFeatureVector {
    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = FeatureRecord::new([("temp", 1.0), ("temp", 2.0)]).unwrap_err();
        assert!(matches!(err, RecordError::DuplicateField(n) if n == "temp"));
    }

    #[test]
    fn lookup_by_name_ignores_order() {
        let r = FeatureRecord::new([("lat", 10.0), ("temp", 20.0)]).unwrap();
        assert_eq!(r.get("temp"), Some(20.0));
        assert_eq!(r.get("lat"), Some(10.0));
        assert_eq!(r.get("humidity"), None);
        assert_eq!(r.names(), vec!["lat".to_string(), "temp".to_string()]);
    }
}
