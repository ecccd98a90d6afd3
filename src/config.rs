use eyre::{Result, format_err};
use netpol_form::messages::Catalog;

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Config {
    /// Message templates by key, overriding the built-in English ones.
    /// Templates may use the `{path}` placeholder.
    #[serde(default)]
    pub messages: Catalog,
}

impl Config {
    /// Load the config file, or the defaults when none is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config = std::fs::read(path).map_err(|e| format_err!("read config failed: {path}: {e}"))?;
        serde_yaml::from_slice(&config).map_err(|e| format_err!("parse config failed: {e}"))
    }
}
