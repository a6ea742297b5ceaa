//! Endpoint configuration for the upcheck monitor
//!
//! This module handles loading and validating the monitored endpoint set
//! from a YAML document, plus the run-time parameters (cycle interval and
//! latency threshold) passed on the command line.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// One monitored HTTP endpoint, immutable after load
///
/// Two descriptors with the same `url` and different `name`s share one
/// statistics entry; ledger identity is the URL, not the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Display name used in log lines and reports
    pub name: String,

    /// Target URL, required and must parse as an absolute URL
    pub url: String,

    /// HTTP method, defaults to GET when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Extra request headers, attached verbatim
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Endpoint {
    /// Effective HTTP method for this endpoint
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// Host portion of the endpoint URL, for startup logging
    #[must_use]
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

/// Run-time monitor parameters
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Wall-clock interval between check cycles
    pub interval: Duration,

    /// Maximum latency still classified as UP
    pub latency_threshold: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            latency_threshold: Duration::from_millis(500),
        }
    }
}

/// Load and validate the endpoint list from a YAML file
///
/// The document is a YAML sequence of endpoint descriptors. Any failure
/// here is fatal: the monitor never starts with a partial endpoint set.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, `Error::Yaml` if the
/// document does not deserialize, and `Error::Config` if the list is
/// empty or any descriptor is invalid.
pub fn load_endpoints(path: &Path) -> Result<Vec<Endpoint>> {
    let content = std::fs::read_to_string(path)?;
    let endpoints = parse_endpoints(&content)?;
    Ok(endpoints)
}

/// Parse and validate endpoint descriptors from YAML text
pub fn parse_endpoints(content: &str) -> Result<Vec<Endpoint>> {
    let endpoints: Vec<Endpoint> = serde_yaml::from_str(content)?;
    validate(&endpoints)?;
    Ok(endpoints)
}

fn validate(endpoints: &[Endpoint]) -> Result<()> {
    if endpoints.is_empty() {
        return Err(Error::config("endpoint list is empty"));
    }

    for endpoint in endpoints {
        if endpoint.name.trim().is_empty() {
            return Err(Error::config(format!(
                "endpoint '{}' has an empty name",
                endpoint.url
            )));
        }

        Url::parse(&endpoint.url).map_err(|e| {
            Error::config(format!("invalid URL '{}': {e}", endpoint.url))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
- name: fetch index page
  url: https://example.com/
- name: fetch careers page
  url: https://example.com/careers
  method: GET
- name: post to endpoint
  url: https://example.com/body
  method: POST
  headers:
    content-type: application/json
"#;

    #[test]
    fn test_parse_sample_document() {
        let endpoints = parse_endpoints(SAMPLE).unwrap();
        assert_eq!(endpoints.len(), 3);
        assert_eq!(endpoints[0].name, "fetch index page");
        assert_eq!(endpoints[0].url, "https://example.com/");
        assert_eq!(
            endpoints[2].headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_method_defaults_to_get() {
        let endpoints = parse_endpoints(SAMPLE).unwrap();
        assert_eq!(endpoints[0].method(), "GET");
        assert_eq!(endpoints[2].method(), "POST");
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let result = parse_endpoints("[]");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let doc = "- name: broken\n  url: not a url\n";
        let result = parse_endpoints(doc);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let result = parse_endpoints("{{{ not yaml");
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_host_extraction() {
        let endpoints = parse_endpoints(SAMPLE).unwrap();
        assert_eq!(endpoints[0].host().as_deref(), Some("example.com"));
    }

    #[test]
    fn test_default_monitor_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.interval, Duration::from_secs(15));
        assert_eq!(config.latency_threshold, Duration::from_millis(500));
    }
}
