// --- File: crates/rendezvous_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{get_config_prefix, CONFIG_SEPARATOR};

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. built-in defaults (`AppConfig::default()`)
/// 2. `config/default.{toml,yaml,json}` if present
/// 3. `config/{RUN_ENV}.{toml,yaml,json}` if present (`RUN_ENV` defaults to `debug`)
/// 4. environment variables `RENDEZVOUS__SECTION__KEY`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let prefix = get_config_prefix();

    let default_path = format!("{}/default", config_dir);
    let env_path = format!("{}/{}", config_dir, run_env);
    debug!(
        "Loading configuration from {} and {} (env prefix {})",
        default_path, env_path, prefix
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path).required(false))
        .add_source(File::with_name(&env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(CONFIG_SEPARATOR)
                .separator(CONFIG_SEPARATOR),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file named by `DOTENV_OVERRIDE` wins, then a first command line
/// argument starting with `.env`, then `.env`. Loading happens at most once
/// per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
