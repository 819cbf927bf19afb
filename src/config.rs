use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is required when LISTING_STORE={store}")]
    Missing { name: &'static str, store: &'static str },

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which backend the listing fetchers talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite {
        path: PathBuf,
        seed_path: Option<PathBuf>,
    },
    Firestore {
        project_id: String,
        api_key: Option<String>,
        base_url: Option<String>,
    },
}

impl StoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite { .. } => "sqlite",
            StoreBackend::Firestore { .. } => "firestore",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub store: StoreBackend,
    pub store_timeout: Duration,
    pub home_section_limit: u32,
    pub category_page_limit: u32,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable lookup, so tests
    /// don't have to touch process-wide environment variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "BIND_ADDR", "127.0.0.1:3000".parse().ok())?;
        let max_workers = parse_or(&lookup, "MAX_WORKERS", Some(8usize))?;
        let timeout_secs = parse_or(&lookup, "STORE_TIMEOUT_SECS", Some(30u64))?;
        let home_section_limit = positive(&lookup, "HOME_SECTION_LIMIT", 4)?;
        let category_page_limit = positive(&lookup, "CATEGORY_PAGE_LIMIT", 8)?;

        let backend = lookup("LISTING_STORE").unwrap_or_else(|| "sqlite".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "sqlite" => StoreBackend::Sqlite {
                path: lookup("DATABASE_PATH")
                    .unwrap_or_else(|| "homefinder.sqlite3".to_string())
                    .into(),
                seed_path: lookup("SEED_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
            },
            "firestore" => StoreBackend::Firestore {
                project_id: lookup("FIRESTORE_PROJECT_ID")
                    .filter(|p| !p.trim().is_empty())
                    .ok_or(ConfigError::Missing {
                        name: "FIRESTORE_PROJECT_ID",
                        store: "firestore",
                    })?,
                api_key: lookup("FIRESTORE_API_KEY").filter(|k| !k.is_empty()),
                base_url: lookup("FIRESTORE_BASE_URL").filter(|u| !u.is_empty()),
            },
            other => {
                return Err(ConfigError::Invalid {
                    name: "LISTING_STORE",
                    value: other.to_string(),
                    reason: "expected `sqlite` or `firestore`".into(),
                })
            }
        };

        Ok(Self {
            bind_addr,
            max_workers,
            store,
            store_timeout: Duration::from_secs(timeout_secs),
            home_section_limit,
            category_page_limit,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
            reason: "no default available".into(),
        }),
    }
}

fn positive<F>(lookup: &F, name: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value: u32 = parse_or(lookup, name, Some(default))?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: "0".into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(value)
}
