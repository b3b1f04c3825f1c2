use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use keytui::api::{DEFAULT_BASE_URL, DEFAULT_SCAN_LIMIT};
use keytui::model::{PageSize, SortSpec, TtlClass};
use keytui::{SortField, SortOrder};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub token: Option<String>,
    pub connection_id: Option<String>,
    pub vim_mode: bool,
    /// Pattern sent to the key listing endpoint
    pub scan_pattern: String,
    pub scan_limit: usize,
    pub page_size: usize,
    pub sort_field: String,
    pub sort_order: String,
    pub ttl_class: String,
    pub request_timeout_secs: u64,
    pub ping_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            connection_id: None,
            vim_mode: false,
            scan_pattern: "*".to_string(),
            scan_limit: DEFAULT_SCAN_LIMIT,
            page_size: PageSize::default().get(),
            sort_field: "name".to_string(),
            sort_order: "asc".to_string(),
            ttl_class: "all".to_string(),
            request_timeout_secs: 10,
            ping_interval_secs: 30,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::parse(&config_str).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn parse(yaml: &str) -> Result<Self> {
        // An empty file deserializes to null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            field: SortField::parse_lossy(&self.sort_field),
            order: SortOrder::parse_lossy(&self.sort_order),
        }
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::from_value_lossy(self.page_size)
    }

    pub fn ttl_class(&self) -> TtlClass {
        TtlClass::parse_lossy(&self.ttl_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.scan_limit, 1000);
        assert_eq!(config.page_size(), PageSize::P50);
        assert_eq!(config.ping_interval_secs, 30);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            "base_url: http://redis-proxy:8080\ntoken: secret\npage_size: 100\nsort_field: ttl\nsort_order: desc\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "http://redis-proxy:8080");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.page_size(), PageSize::P100);
        assert_eq!(
            config.sort_spec(),
            SortSpec {
                field: SortField::Ttl,
                order: SortOrder::Desc
            }
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::parse("page_size: 30\nsort_field: color\nttl_class: sometimes\n").unwrap();
        assert_eq!(config.page_size(), PageSize::P50);
        assert_eq!(config.sort_spec(), SortSpec::default());
        assert_eq!(config.ttl_class(), TtlClass::All);
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(Config::parse("base_url: [unclosed").is_err());
    }
}
