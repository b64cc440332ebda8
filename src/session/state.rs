use chrono::{DateTime, Utc};

use crate::core::Prediction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionResultState {
    #[default]
    NotPredicted,
    Predicted(Prediction),
}

/// Holds the latest result for one session.
///
/// Starts as [`SessionResultState::NotPredicted`] and only moves forward:
/// every successful pipeline run replaces the whole value, and nothing
/// resets it.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    state: SessionResultState,
    updated_at: Option<DateTime<Utc>>,
    predictions_made: u64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionResultState {
        self.state
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn predictions_made(&self) -> u64 {
        self.predictions_made
    }

    pub(crate) fn commit(&mut self, prediction: Prediction) {
        self.state = SessionResultState::Predicted(prediction);
        self.updated_at = Some(Utc::now());
        self.predictions_made += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_predicted() {
        let s = ResultStore::new();
        assert_eq!(s.state(), SessionResultState::NotPredicted);
        assert!(s.updated_at().is_none());
        assert_eq!(s.predictions_made(), 0);
    }

    #[test]
    fn commit_replaces_whole_value() {
        let mut s = ResultStore::new();
        s.commit(Prediction::new(1, 0.9));
        let first_at = s.updated_at().unwrap();
        s.commit(Prediction::new(0, 0.6));
        assert_eq!(
            s.state(),
            SessionResultState::Predicted(Prediction::new(0, 0.6))
        );
        assert!(s.updated_at().unwrap() >= first_at);
        assert_eq!(s.predictions_made(), 2);
    }
}
