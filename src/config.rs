use std::env;
use std::path::PathBuf;

pub const PROGRAM_FILE_PATH: &str = "data/program_file.txt";
pub const DEFAULT_QUANTUM: usize = 2;
pub const QUANTUM_ENV_VAR: &str = "SIM_QUANTUM";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("quantum must be a positive integer, got {0:?}")]
    InvalidQuantum(String),
    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),
}

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program_file: PathBuf,
    pub quantum: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            program_file: PathBuf::from(PROGRAM_FILE_PATH),
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl Config {
    /// Builds a config from `[PROGRAM_FILE] [QUANTUM]` (program name already
    /// stripped), falling back to `SIM_QUANTUM` and then the defaults.
    pub fn from_args<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Config::from_parts(args, env::var(QUANTUM_ENV_VAR).ok())
    }

    fn from_parts<I>(args: I, env_quantum: Option<String>) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        if let Some(path) = args.next() {
            config.program_file = PathBuf::from(path);
        }

        if let Some(quantum) = args.next().or(env_quantum) {
            config.quantum = parse_quantum(&quantum)?;
        }

        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        Ok(config)
    }
}

fn parse_quantum(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(quantum) if quantum > 0 => Ok(quantum),
        _ => Err(ConfigError::InvalidQuantum(value.to_string())),
    }
}
