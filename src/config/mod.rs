//! Runtime configuration from the environment.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DATA_DIR: &str = "data";

/// Server configuration. Two knobs, both optional:
/// `SPOOLQ_PORT` (default 4000) and `SPOOLQ_DATA_DIR` (default `./data`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("SPOOLQ_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_dir = std::env::var("SPOOLQ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        Self { port, data_dir }
    }

    /// Directory holding the LMDB environment.
    pub fn lmdb_path(&self) -> PathBuf {
        self.data_dir.join("orders.lmdb")
    }

    /// Flat file a pre-database deployment may have left behind.
    pub fn legacy_orders_path(&self) -> PathBuf {
        self.data_dir.join("orders.json")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_the_data_dir() {
        let config = AppConfig {
            port: 4000,
            data_dir: PathBuf::from("/var/lib/spoolq"),
        };
        assert_eq!(config.lmdb_path(), PathBuf::from("/var/lib/spoolq/orders.lmdb"));
        assert_eq!(
            config.legacy_orders_path(),
            PathBuf::from("/var/lib/spoolq/orders.json")
        );
    }
}
