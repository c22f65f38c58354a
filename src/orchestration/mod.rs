pub mod evaluator;

pub use evaluator::{DeepDive, OpenedScenario, ScenarioEvaluator, ScenarioReport, Thresholds};
