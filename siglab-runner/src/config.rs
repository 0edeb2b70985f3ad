//! Serializable run configuration with a content-addressed id.

use serde::{Deserialize, Serialize};
use siglab_core::config::StrategyConfig;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce a single backtest: the instrument, the
/// timeframe, and the full strategy parameter surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub symbol: String,
    pub timeframe: String,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl RunConfig {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            strategy: StrategyConfig::default(),
        }
    }

    /// Deterministic hash id for this configuration.
    ///
    /// Two runs with identical configs share a RunId, which makes results
    /// content-addressable for caching and comparison.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Parse a declarative config from TOML text. Where the bytes come
    /// from (file, env, stdin) is the caller's concern.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
