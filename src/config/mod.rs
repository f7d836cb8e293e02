use anyhow::{anyhow, Result};
use placetrust_application::prelude::{ReconciliationSettings, ReviewSettings};
use placetrust_core::{entities::Distance, reputation::ReputationRules};
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "placetrust.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub reviews: ReviewSettings,
    pub search: Search,
    pub reconciliation: Reconciliation,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Search {
    pub max_nearby_results: usize,
    pub default_page_size: i64,
}

pub struct Reconciliation {
    pub settings: ReconciliationSettings,
    pub task_interval_time: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            reviews,
            search,
            reputation,
            reconciliation,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Reviews {
            max_check_in_distance,
        } = reviews.unwrap_or_default();
        let max_check_in_distance = Distance::from_meters(max_check_in_distance);
        if !max_check_in_distance.is_positive() {
            return Err(anyhow!(
                "Invalid maximum check-in distance: {max_check_in_distance}"
            ));
        }

        let raw::Reputation {
            review_created,
            gps_verified_bonus,
            helpful_vote,
            moderation_penalty,
        } = reputation.unwrap_or_default();
        let reviews = ReviewSettings {
            max_check_in_distance,
            reputation: ReputationRules {
                review_created,
                gps_verified_bonus,
                helpful_vote,
                moderation_penalty,
            },
        };

        let raw::Search {
            max_nearby_results,
            default_page_size,
        } = search.unwrap_or_default();
        if default_page_size < 1 {
            return Err(anyhow!("Invalid default page size: {default_page_size}"));
        }
        let search = Search {
            max_nearby_results,
            default_page_size,
        };

        let raw::Reconciliation {
            batch_size,
            max_retries,
            task_interval_time,
        } = reconciliation.unwrap_or_default();
        if batch_size == 0 {
            return Err(anyhow!("The reconciliation batch size must be positive"));
        }
        if task_interval_time.is_zero() {
            return Err(anyhow!("The reconciliation interval must be positive"));
        }
        let reconciliation = Reconciliation {
            settings: ReconciliationSettings {
                batch_size,
                max_retries,
            },
            task_interval_time,
        };

        Ok(Self {
            db,
            reviews,
            search,
            reconciliation,
        })
    }
}
