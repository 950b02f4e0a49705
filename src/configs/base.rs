use serde::{Deserialize, Serialize};

use crate::configs::*;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub extractor: ExtractorConfig,
  #[serde(default)]
  pub logging: Option<LoggingConfig>,
}

use crate::common::types::AnyResult;

const CONFIG_PATHS: [&str; 2] = ["config.toml", "config.default.toml"];

impl Config {
  /// Reads `config.toml`, then `config.default.toml`. Built-in defaults are
  /// used when neither file exists.
  pub fn load() -> AnyResult<Self> {
    let Some(config_path) = CONFIG_PATHS
      .iter()
      .find(|path| std::path::Path::new(path).exists())
    else {
      eprintln!("No config file found, using built-in defaults");
      return Ok(Self::default());
    };

    eprintln!("Loading configuration from: {}", config_path);

    let config_str = std::fs::read_to_string(config_path)?;
    Self::parse(&config_str).map_err(|e| format!("{}: {}", config_path, e).into())
  }

  pub fn parse(config_str: &str) -> AnyResult<Self> {
    let config: Config = toml::from_str(config_str)?;
    Ok(config)
  }
}
