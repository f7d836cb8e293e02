use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("placetrust.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub reviews: Option<Reviews>,
    pub search: Option<Search>,
    pub reputation: Option<Reputation>,
    pub reconciliation: Option<Reconciliation>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reviews {
    pub max_check_in_distance: f64,
}

impl Default for Reviews {
    fn default() -> Self {
        Config::default().reviews.expect("Reviews configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Search {
    pub max_nearby_results: usize,
    pub default_page_size: i64,
}

impl Default for Search {
    fn default() -> Self {
        Config::default().search.expect("Search configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reputation {
    pub review_created: u32,
    pub gps_verified_bonus: u32,
    pub helpful_vote: u32,
    pub moderation_penalty: u32,
}

impl Default for Reputation {
    fn default() -> Self {
        Config::default()
            .reputation
            .expect("Reputation configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reconciliation {
    pub batch_size: u64,
    pub max_retries: u32,
    #[serde(deserialize_with = "deserialize_duration")]
    pub task_interval_time: Duration,
}

impl Default for Reconciliation {
    fn default() -> Self {
        Config::default()
            .reconciliation
            .expect("Reconciliation configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.reviews.is_some());
        assert!(cfg.search.is_some());
        assert!(cfg.reputation.is_some());
        assert!(cfg.reconciliation.is_some());
    }

    #[test]
    fn default_reconciliation_config() {
        let cfg = Reconciliation::default();
        assert_eq!(100, cfg.batch_size);
        assert_eq!(3, cfg.max_retries);
        assert_eq!(Duration::from_secs(3600), cfg.task_interval_time);
    }

    #[test]
    fn parse_partial_config() {
        let cfg: Config = toml::from_str(
            r#"
[reconciliation]
batch-size = 10
max-retries = 0
task-interval-time = "30m"
"#,
        )
        .unwrap();
        assert!(cfg.db.is_none());
        let reconciliation = cfg.reconciliation.unwrap();
        assert_eq!(10, reconciliation.batch_size);
        assert_eq!(Duration::from_secs(1800), reconciliation.task_interval_time);
    }
}
