use crate::engine::solver::SolverSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Explicit configuration handed to the calculator at invocation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub opener_mode: OpenerMode,
    pub solver: SolverSettings,
    pub sweep_samples: usize,
}

/// How the flash-loan amount is sized when a position is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenerMode {
    /// Closed form `user * cross / (1 - ltv)`.
    #[default]
    Simple,
    /// Self-consistent loan size with the upfront fee charged on the pledge.
    Equilibrium,
}

impl std::fmt::Display for OpenerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenerMode::Simple => write!(f, "simple"),
            OpenerMode::Equilibrium => write!(f, "equilibrium"),
        }
    }
}

pub const DEFAULT_SWEEP_SAMPLES: usize = 101;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            opener_mode: OpenerMode::Simple,
            solver: SolverSettings::default(),
            sweep_samples: DEFAULT_SWEEP_SAMPLES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let opener_mode = match env_map
            .get("OPENER_MODE")
            .map(|s| s.as_str())
            .unwrap_or("simple")
        {
            "simple" => OpenerMode::Simple,
            "equilibrium" => OpenerMode::Equilibrium,
            other => {
                return Err(ConfigError::InvalidValue(
                    "OPENER_MODE".to_string(),
                    format!("must be simple or equilibrium, got {}", other),
                ))
            }
        };

        let tolerance = match env_map.get("SOLVER_TOLERANCE") {
            Some(s) => s
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t > 0.0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "SOLVER_TOLERANCE".to_string(),
                        "must be a positive number".to_string(),
                    )
                })?,
            None => defaults.solver.tolerance,
        };

        let max_iterations = match env_map.get("SOLVER_MAX_ITERATIONS") {
            Some(s) => s.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SOLVER_MAX_ITERATIONS".to_string(),
                    "must be a positive u32".to_string(),
                )
            })?,
            None => defaults.solver.max_iterations,
        };

        let sweep_samples = match env_map.get("SWEEP_SAMPLES") {
            Some(s) => s.parse::<usize>().ok().filter(|n| *n >= 2).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SWEEP_SAMPLES".to_string(),
                    "must be an integer >= 2".to_string(),
                )
            })?,
            None => defaults.sweep_samples,
        };

        Ok(Config {
            port,
            opener_mode,
            solver: SolverSettings {
                tolerance,
                max_iterations,
            },
            sweep_samples,
        })
    }
}
