use std::{env, path::PathBuf};

use crate::{Result, TriageErr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub training_path: PathBuf,
    pub testing_path: PathBuf,
    pub severity_path: PathBuf,
    pub description_path: PathBuf,
    pub precaution_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            training_path: "Data/Training.csv".into(),
            testing_path: "Data/Testing.csv".into(),
            severity_path: "MasterData/symptom_severity.csv".into(),
            description_path: "MasterData/symptom_Description.csv".into(),
            precaution_path: "MasterData/symptom_precaution.csv".into(),
        }
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and the `*_PATH` variables, falling back to the
    /// defaults for anything unset.
    ///
    /// # Errors
    /// Returns `TriageErr::InvalidConfig` if `PORT` isn't a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, resolving variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .parse()
                .map_err(|_| TriageErr::InvalidConfig { key: "PORT", value: port })?;
        }

        let paths = [
            ("TRAINING_PATH", &mut config.training_path),
            ("TESTING_PATH", &mut config.testing_path),
            ("SEVERITY_PATH", &mut config.severity_path),
            ("DESCRIPTION_PATH", &mut config.description_path),
            ("PRECAUTION_PATH", &mut config.precaution_path),
        ];
        for (key, path) in paths {
            if let Some(value) = lookup(key) {
                *path = value.into();
            }
        }

        Ok(config)
    }

    /// The `host:port` address to listen at.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
