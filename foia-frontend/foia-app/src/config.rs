use std::{str::FromStr, time::Duration};

use log::warn;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Unknown setting `{0}`")]
    UnknownKey(String),
    #[error("Setting `{key}` expects a number, got `{value}`")]
    NotANumber { key: String, value: String },
    #[error("Setting `{0}` can't be empty")]
    Empty(String),
}

/// Settings for one search box. The page can override any of them with
/// `data-*` attributes on the mount element.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub agency_endpoint: String,
    pub api_origin: Option<String>,
    pub detail_prefix: String,
    pub suggestion_limit: usize,
    pub min_length: usize,
    pub analytics_timeout: Duration,
    pub search_action: String,
    pub search_method: String,
    pub query_param: String,
    pub placeholder: String,
    pub cache_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            agency_endpoint: "/api/agency/".to_string(),
            api_origin: None,
            detail_prefix: "/contacts/".to_string(),
            suggestion_limit: 500,
            min_length: 1,
            analytics_timeout: Duration::from_millis(500),
            search_action: "/search/".to_string(),
            search_method: "get".to_string(),
            query_param: "q".to_string(),
            placeholder: "Search agencies".to_string(),
            cache_key: "agency-prefetch".to_string(),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Empty(key.to_string()));
    }
    Ok(value.to_string())
}

impl SearchConfig {
    /// Applies one setting. Keys are the dataset names with the `data-`
    /// prefix removed, e.g. `analytics-timeout-ms`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "agency-endpoint" => self.agency_endpoint = non_empty(key, value)?,
            "api-origin" => {
                let origin = value.trim().trim_end_matches('/');
                self.api_origin = (!origin.is_empty()).then(|| origin.to_string());
            }
            "detail-prefix" => self.detail_prefix = non_empty(key, value)?,
            "suggestion-limit" => self.suggestion_limit = parse_number(key, value)?,
            "min-length" => self.min_length = parse_number(key, value)?,
            "analytics-timeout-ms" => {
                self.analytics_timeout = Duration::from_millis(parse_number(key, value)?)
            }
            "search-action" => self.search_action = non_empty(key, value)?,
            "search-method" => self.search_method = non_empty(key, value)?.to_ascii_lowercase(),
            "query-param" => self.query_param = non_empty(key, value)?,
            "placeholder" => self.placeholder = value.to_string(),
            "cache-key" => self.cache_key = non_empty(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Builds a config from defaults plus the given settings. Settings that
    /// fail to parse are logged and skipped.
    pub fn from_settings<'a>(settings: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::default();
        for (key, value) in settings {
            if let Err(e) = config.apply(key, value) {
                warn!("Ignoring search box setting: {e}");
            }
        }
        config
    }

    /// Full URL of the agency list.
    pub fn agency_url(&self) -> String {
        match &self.api_origin {
            Some(origin) => format!("{origin}{}", self.agency_endpoint),
            None => self.agency_endpoint.clone(),
        }
    }

    /// Detail page of an agency. The slug is used as provided.
    pub fn detail_url(&self, slug: &str) -> String {
        format!("{}{slug}/", self.detail_prefix)
    }
}

#[cfg(feature = "csr")]
impl SearchConfig {
    const SETTINGS: [&'static str; 11] = [
        "agency-endpoint",
        "api-origin",
        "detail-prefix",
        "suggestion-limit",
        "min-length",
        "analytics-timeout-ms",
        "search-action",
        "search-method",
        "query-param",
        "placeholder",
        "cache-key",
    ];

    /// Reads the `data-*` attributes of the mount element.
    pub fn from_element(element: &web_sys::HtmlElement) -> Self {
        let values: Vec<(&str, String)> = Self::SETTINGS
            .iter()
            .filter_map(|key| element.get_attribute(&format!("data-{key}")).map(|v| (*key, v)))
            .collect();
        Self::from_settings(values.iter().map(|(k, v)| (*k, v.as_str())))
    }
}
