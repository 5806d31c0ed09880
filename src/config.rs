use std::path::PathBuf;

use serde::Deserialize;

use crate::services::fuzzy::DEFAULT_THRESHOLD;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Location of the similarity model artifact (plain or gzip JSON)
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum fuzzy-match score (0-100) for accepting a title
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Number of recommendations when a request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("recommender.json.gz")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_match_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_top_n() -> usize {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=100.0).contains(&self.match_threshold) {
            anyhow::bail!(
                "MATCH_THRESHOLD must be between 0 and 100, got {}",
                self.match_threshold
            );
        }
        if self.default_top_n == 0 {
            anyhow::bail!("DEFAULT_TOP_N must be greater than zero");
        }
        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter::<_, Config>(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.model_path, PathBuf::from("recommender.json.gz"));
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.match_threshold, 60.0);
        assert_eq!(config.default_top_n, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("MODEL_PATH", "/srv/models/movies.json"),
            ("PORT", "8080"),
            ("MATCH_THRESHOLD", "75.5"),
        ]);
        assert_eq!(config.model_path, PathBuf::from("/srv/models/movies.json"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.match_threshold, 75.5);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = from_pairs(&[("MATCH_THRESHOLD", "120")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let config = from_pairs(&[("DEFAULT_TOP_N", "0")]);
        assert!(config.validate().is_err());
    }
}
