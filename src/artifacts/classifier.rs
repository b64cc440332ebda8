use crate::core::Prediction;
use crate::error::ModelError;

pub trait Classifier: Send + Sync {
    fn feature_names(&self) -> Option<&[String]>;
    fn n_features(&self) -> usize;
    fn classes(&self) -> &[i64];
    fn get_votes_for_instance(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Highest-voted class; ties go to the lowest class index.
    fn predict(&self, row: &[f64]) -> Result<Prediction, ModelError> {
        let votes = self.get_votes_for_instance(row)?;
        let total: f64 = votes.iter().sum();

        let mut best = 0;
        for (i, &v) in votes.iter().enumerate() {
            if v > votes[best] {
                best = i;
            }
        }

        let confidence = if total > 0.0 { votes[best] / total } else { 0.0 };
        Ok(Prediction::new(self.classes()[best], confidence))
    }
}
