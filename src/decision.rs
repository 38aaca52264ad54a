use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Threshold used when nothing else is configured.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum DecisionError {
    #[error("invalid input: {name} probability {value} is not in [0, 1]")]
    InvalidInput { name: &'static str, value: f64 },
    #[error("invalid configuration: confidence threshold {0} is not in (0, 1]")]
    InvalidConfiguration(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Real,
    Fake,
    Uncertain,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Real => "real",
            Decision::Fake => "fake",
            Decision::Uncertain => "uncertain",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum confidence needed to commit to Real or Fake.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, DecisionError> {
        // NaN fails both comparisons and is rejected here
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(DecisionError::InvalidConfiguration(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = DecisionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Class probabilities for one analysed text.
///
/// The two values are expected to sum to 1 but that is not checked here;
/// only the range of each value is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassProbabilities {
    pub real: f64,
    pub fake: f64,
}

impl ClassProbabilities {
    pub fn new(real: f64, fake: f64) -> Result<Self, DecisionError> {
        check_probability("real", real)?;
        check_probability("fake", fake)?;
        Ok(Self { real, fake })
    }

    pub fn confidence(&self) -> f64 {
        self.real.max(self.fake)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), DecisionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DecisionError::InvalidInput { name, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionResult {
    pub label: Decision,
    pub confidence: f64,
    pub prob_real: f64,
    pub prob_fake: f64,
}

/// Maps a probability pair to a [`Decision`] under a fixed threshold.
///
/// The engine is a plain value built once from configuration; it holds no
/// other state and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecisionEngine {
    threshold: Threshold,
}

impl DecisionEngine {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn decide(&self, prob_real: f64, prob_fake: f64) -> Result<DecisionResult, DecisionError> {
        let probabilities = ClassProbabilities::new(prob_real, prob_fake)?;
        Ok(self.decide_probabilities(probabilities))
    }

    pub fn decide_probabilities(&self, probabilities: ClassProbabilities) -> DecisionResult {
        let ClassProbabilities { real, fake } = probabilities;
        let confidence = probabilities.confidence();

        // Order matters: the threshold is checked first, and an exact tie
        // at or above it resolves to Real.
        let label = if confidence < self.threshold.value() {
            Decision::Uncertain
        } else if fake > real {
            Decision::Fake
        } else {
            Decision::Real
        };

        tracing::debug!(
            prob_real = real,
            prob_fake = fake,
            confidence,
            threshold = self.threshold.value(),
            decision = %label,
            "decision made"
        );

        DecisionResult {
            label,
            confidence,
            prob_real: real,
            prob_fake: fake,
        }
    }
}

/// Decide with an explicit threshold value.
///
/// The threshold is validated before the probabilities, so a bad threshold
/// is reported as a configuration error even when the inputs are also bad.
pub fn decide(
    prob_real: f64,
    prob_fake: f64,
    threshold: f64,
) -> Result<DecisionResult, DecisionError> {
    let threshold = Threshold::new(threshold)?;
    DecisionEngine::new(threshold).decide(prob_real, prob_fake)
}
