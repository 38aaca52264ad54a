use super::{Classifier, ClassifierError, LabelMapping, LabelScore};

/// Classifier stand-in that returns the same scores for every text.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScores {
    real: f64,
    fake: f64,
    labels: LabelMapping,
}

impl FixedScores {
    pub fn new(real: f64, fake: f64) -> Self {
        Self {
            real,
            fake,
            labels: LabelMapping::default(),
        }
    }

    pub fn with_labels(mut self, labels: LabelMapping) -> Self {
        self.labels = labels;
        self
    }
}

impl Classifier for FixedScores {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn classify(&self, _text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        Ok(vec![
            LabelScore::new(self.labels.real.clone(), self.real),
            LabelScore::new(self.labels.fake.clone(), self.fake),
        ])
    }
}
