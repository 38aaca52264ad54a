use crate::classifier::{Classifier, ClassifierError, LabelMapping};
use crate::decision::{DecisionEngine, DecisionError, DecisionResult};
use crate::input::{DEFAULT_MIN_CHARS, InputError, NewsText};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("analysis failed, please retry: {0}")]
    Classifier(#[from] ClassifierError),
    #[error("analysis failed, please retry: {0}")]
    Decision(#[from] DecisionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub chars: usize,
    pub decision: DecisionResult,
}

/// Text in, decision out.
///
/// Owns the classifier for as long as the analyzer lives, so whatever the
/// classifier holds on to is released when the analyzer is dropped.
pub struct Analyzer {
    classifier: Box<dyn Classifier>,
    engine: DecisionEngine,
    labels: LabelMapping,
    min_chars: usize,
}

impl Analyzer {
    pub fn new<C: Classifier + 'static>(classifier: C, engine: DecisionEngine) -> Self {
        Self {
            classifier: Box::new(classifier),
            engine,
            labels: LabelMapping::default(),
            min_chars: DEFAULT_MIN_CHARS,
        }
    }

    pub fn labels(mut self, labels: LabelMapping) -> Self {
        self.labels = labels;
        self
    }

    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn analyze(&self, raw: &str) -> Result<Analysis, AnalysisError> {
        let text = NewsText::parse(raw, self.min_chars)?;

        tracing::info!(classifier = self.classifier.name(), chars = text.chars(), "analyzing text");
        let scores = self.classifier.classify(text.as_str()).inspect_err(|e| {
            tracing::error!(classifier = self.classifier.name(), error = %e, "classifier failed");
        })?;

        let probabilities = match self.labels.probabilities(&scores) {
            Ok(p) => p,
            Err(ClassifierError::Probability(e)) => return Err(AnalysisError::Decision(e)),
            Err(e) => return Err(e.into()),
        };

        Ok(Analysis {
            chars: text.chars(),
            decision: self.engine.decide_probabilities(probabilities),
        })
    }
}
