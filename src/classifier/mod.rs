use crate::decision::{ClassProbabilities, DecisionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod command;
pub mod fixed;

pub use command::CommandClassifier;
pub use fixed::FixedScores;

/// Scores further than this from summing to 1 are logged.
pub const SUM_TOLERANCE: f64 = 1e-3;

pub trait Classifier {
    fn name(&self) -> &'static str;
    fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError>;
}

/// One entry of text-classification output, e.g. `{"label": "Fake", "score": 0.93}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
    #[error("malformed classifier output: {0}")]
    MalformedOutput(String),
    #[error("classifier output has no score for label '{0}'")]
    MissingLabel(String),
    #[error(transparent)]
    Probability(#[from] DecisionError),
}

/// Which classifier labels stand for the real and fake classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    pub real: String,
    pub fake: String,
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            real: "Real".to_string(),
            fake: "Fake".to_string(),
        }
    }
}

impl LabelMapping {
    pub fn new(real: impl Into<String>, fake: impl Into<String>) -> Self {
        Self {
            real: real.into(),
            fake: fake.into(),
        }
    }

    /// Pick the real and fake scores out of classifier output by label name.
    ///
    /// Position in the list is never used. If a configured name is absent the
    /// generic `LABEL_0` (real) / `LABEL_1` (fake) names are tried.
    pub fn probabilities(
        &self,
        scores: &[LabelScore],
    ) -> Result<ClassProbabilities, ClassifierError> {
        let real = find_score(scores, &self.real, "LABEL_0")?;
        let fake = find_score(scores, &self.fake, "LABEL_1")?;

        let sum = real + fake;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            tracing::warn!(real, fake, sum, "classifier scores do not sum to 1");
        }

        Ok(ClassProbabilities::new(real, fake)?)
    }
}

fn find_score(scores: &[LabelScore], name: &str, fallback: &str) -> Result<f64, ClassifierError> {
    scores
        .iter()
        .find(|s| s.label.eq_ignore_ascii_case(name))
        .or_else(|| scores.iter().find(|s| s.label.eq_ignore_ascii_case(fallback)))
        .map(|s| s.score)
        .ok_or_else(|| ClassifierError::MissingLabel(name.to_string()))
}
