//! Per-environment configuration.
//!
//! The environment is chosen once at startup and resolved into a [`Config`]
//! that is passed to whatever needs it.

use clap::ValueEnum;
use serde::Serialize;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Settings bundle for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub environment: Environment,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: &'static str,
    /// Include the validated output when reporting a valid shape.
    pub echo_output: bool,
}

impl Config {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Local => Config {
                environment,
                log_filter: "daycare_forms=debug",
                echo_output: true,
            },
            Environment::Staging => Config {
                environment,
                log_filter: "daycare_forms=info",
                echo_output: true,
            },
            Environment::Production => Config {
                environment,
                log_filter: "daycare_forms=warn",
                echo_output: false,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::for_environment(Environment::default())
    }
}
