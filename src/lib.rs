pub mod analysis;
pub mod classifier;
pub mod config;
pub mod decision;
pub mod input;
pub mod logging;
pub mod report;
pub mod schema;
pub mod terminal;

pub use analysis::{Analysis, AnalysisError, Analyzer};
pub use decision::{
    ClassProbabilities, Decision, DecisionEngine, DecisionError, DecisionResult, Threshold, decide,
};
pub use report::Report;
