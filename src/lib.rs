pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod report;

pub use config::{Config, OpenerMode};
pub use domain::{
    CloseResult, DexAssumptions, GasAssumptions, LoanTerms, MarketInputs, MarketView,
    OpenResult, ScenarioParams, SweepRange, TokenLabel, TokenLabels, UserPosition,
};
pub use engine::{close, open, open_with_mode, SolverSettings};
pub use error::{AppError, CalcError};
pub use orchestration::{ScenarioEvaluator, ScenarioReport};
