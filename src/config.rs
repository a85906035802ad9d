use std::{env, path::PathBuf};
const ENV_HEADER_SCAN_ROWS: &str = "RPTMERGE_HEADER_SCAN_ROWS";
const ENV_BLANK_RUN_LIMIT: &str = "RPTMERGE_BLANK_RUN_LIMIT";
const ENV_STORE_DIR: &str = "RPTMERGE_STORE_DIR";
const DEFAULT_BLANK_RUN_LIMIT: usize = 3;
const DEFAULT_STORE_DIR: &str = "databases";
const MAX_HEADER_SCAN_ROWS: usize = 10_000;
const MAX_BLANK_RUN_LIMIT: usize = 1_000;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Replaces the row bound of every scan-based header rule when set.
    pub header_scan_rows: Option<usize>,
    pub blank_run_limit: usize,
    pub store_dir: PathBuf,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            header_scan_rows: None,
            blank_run_limit: DEFAULT_BLANK_RUN_LIMIT,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}
impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let header_scan_rows = lookup(ENV_HEADER_SCAN_ROWS)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .map(|v| v.min(MAX_HEADER_SCAN_ROWS));
        let blank_run_limit = lookup(ENV_BLANK_RUN_LIMIT)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .map_or(defaults.blank_run_limit, |v| v.min(MAX_BLANK_RUN_LIMIT));
        let store_dir = lookup(ENV_STORE_DIR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .map_or(defaults.store_dir, PathBuf::from);
        Self {
            header_scan_rows,
            blank_run_limit,
            store_dir,
        }
    }
}
