use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl MatchingSettings {
    /// Resolve a requested limit against the configured default and cap
    pub fn resolve_limit(&self, requested: Option<u16>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
            .max(1) as usize
    }
}

fn default_limit() -> u16 { 3 }
fn default_max_limit() -> u16 { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
    #[serde(default = "default_lifestyle_weight")]
    pub lifestyle: f64,
    #[serde(default = "default_sports_weight")]
    pub sports: f64,
    #[serde(default = "default_goals_weight")]
    pub goals: f64,
    #[serde(default = "default_transplant_weight")]
    pub transplant: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            personality: default_personality_weight(),
            lifestyle: default_lifestyle_weight(),
            sports: default_sports_weight(),
            goals: default_goals_weight(),
            transplant: default_transplant_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        Self {
            personality: value.personality,
            lifestyle: value.lifestyle,
            sports: value.sports,
            goals: value.goals,
            transplant: value.transplant,
        }
    }
}

fn default_personality_weight() -> f64 { 0.50 }
fn default_lifestyle_weight() -> f64 { 0.20 }
fn default_sports_weight() -> f64 { 0.15 }
fn default_goals_weight() -> f64 { 0.10 }
fn default_transplant_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Scoring weights as used by the matcher
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let weights = self.weights();
        if !weights.is_normalized() {
            return Err(ConfigError::Message(format!(
                "scoring weights must be non-negative and sum to 1.0, got {:?} (sum {})",
                weights,
                weights.sum()
            )));
        }

        if self.matching.max_limit == 0 || self.matching.default_limit == 0 {
            return Err(ConfigError::Message(
                "matching limits must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MENTOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.personality, 0.50);
        assert_eq!(weights.lifestyle, 0.20);
        assert_eq!(weights.sports, 0.15);
        assert_eq!(weights.goals, 0.10);
        assert_eq!(weights.transplant, 0.05);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_resolve_limit() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.resolve_limit(None), 3);
        assert_eq!(matching.resolve_limit(Some(10)), 10);
        assert_eq!(matching.resolve_limit(Some(500)), 50);
        assert_eq!(matching.resolve_limit(Some(0)), 1);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validated().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let mut settings = Settings::default();
        settings.scoring.weights.personality = 0.9;

        let err = settings.validated().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("mentor-match-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[matching]\ndefault_limit = 5\n\n[scoring.weights]\npersonality = 0.4\nlifestyle = 0.3"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.matching.default_limit, 5);
        assert_eq!(settings.scoring.weights.lifestyle, 0.3);
        assert_eq!(settings.scoring.weights.transplant, 0.05);
    }
}
