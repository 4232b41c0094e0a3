use std::path::PathBuf;
use tracing::warn;

pub const SEED_ENV: &str = "UNIBASIC_SEED";
pub const STORAGE_ENV: &str = "UNIBASIC_STORAGE";

/// ## Interpreter settings

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Printed in front of every diagnostic.
    pub diagnostic_prefix: String,
    /// Prompt for `INPUT` without a prompt string.
    pub input_prompt: String,
    /// Fixed seed for `RND` and `GAME:`; random when `None`.
    pub seed: Option<u64>,
    /// Directory used by `STORAGE:`.
    pub storage_dir: PathBuf,
    /// Statements per call to `execute` from the terminal driver.
    pub cycles: usize,
    /// Depth limit for the FOR and GOSUB stacks.
    pub stack_limit: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            diagnostic_prefix: "?".to_string(),
            input_prompt: "? ".to_string(),
            seed: None,
            storage_dir: PathBuf::from(".unibasic"),
            cycles: 5000,
            stack_limit: u16::max_value() as usize,
        }
    }
}

impl Config {
    /// Defaults with `UNIBASIC_SEED` and `UNIBASIC_STORAGE` applied.
    pub fn from_env() -> Config {
        let mut config = Config::default();
        if let Ok(seed) = std::env::var(SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => warn!(%seed, "ignoring {}", SEED_ENV),
            }
        }
        if let Some(dir) = std::env::var_os(STORAGE_ENV) {
            config.storage_dir = PathBuf::from(dir);
        }
        config
    }
}
