use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DONKI_BASE_URL: &str = "https://api.nasa.gov/DONKI/";
pub const DEFAULT_LATIS_BASE_URL: &str = "https://lasp.colorado.edu/space-weather-portal/latis/dap/";
pub const DEFAULT_CATALOG_PATH: &str = "utils/datasets.json";

/// Process-lifetime settings, built once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// DONKI credential. Not validated; the API rejects bad keys itself.
    pub api_key: Option<String>,
    pub donki_base_url: String,
    pub latis_base_url: String,
    pub catalog_path: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            donki_base_url: DEFAULT_DONKI_BASE_URL.to_string(),
            latis_base_url: DEFAULT_LATIS_BASE_URL.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: get("NASA_API_KEY"),
            donki_base_url: get("DONKI_BASE_URL").unwrap_or(defaults.donki_base_url),
            latis_base_url: get("LATIS_BASE_URL").unwrap_or(defaults.latis_base_url),
            catalog_path: get("DATASET_CATALOG").map_or(defaults.catalog_path, PathBuf::from),
            log_dir: get("SPACE_WEATHER_LOG_DIR").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.catalog_path, PathBuf::from("utils/datasets.json"));
    }

    #[test]
    fn lookup_values_override_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("NASA_API_KEY", "abc123"),
            ("LATIS_BASE_URL", "http://localhost:8080/latis/dap/"),
            ("DATASET_CATALOG", "/etc/space-weather/datasets.json"),
            ("DONKI_BASE_URL", "  "),
        ]);
        let config = AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.latis_base_url, "http://localhost:8080/latis/dap/");
        assert_eq!(
            config.catalog_path,
            PathBuf::from("/etc/space-weather/datasets.json")
        );
        assert_eq!(config.donki_base_url, DEFAULT_DONKI_BASE_URL);
        assert_eq!(config.log_dir, None);
    }
}
