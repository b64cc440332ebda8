/// Outcome of one explicit predict action.
///
/// `confidence` is the share of the classifier's votes that went to `code`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub code: i64,
    pub confidence: f64,
}

impl Prediction {
    #[inline]
    pub fn new(code: i64, confidence: f64) -> Self {
        Self { code, confidence }
    }
}
