use serde::{Deserialize, Serialize};

/// Connection settings for a Typesense client, loadable from a JSON file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_url")]
    pub url: String,
    pub api_key: String,

    /// Overrides the default `typesense-rs/<version>` user agent
    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub insecure_skip_verify: bool,

    /// Whole-request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_url() -> String {
    "http://localhost:8108".to_string()
}

impl ClientConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            user_agent: None,
            insecure_skip_verify: false,
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_key": "xyz"}"#).unwrap();
        assert_eq!(config.url, "http://localhost:8108");
        assert_eq!(config.api_key, "xyz");
        assert!(config.user_agent.is_none());
        assert!(!config.insecure_skip_verify);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "url": "https://search.example.com/",
                "api_key": "xyz",
                "user_agent": "bookshop/2.1",
                "insecure_skip_verify": true,
                "timeout_secs": 5,
                "connect_timeout_secs": 1
            }"#,
        )
        .unwrap();
        assert_eq!(config.user_agent.as_deref(), Some("bookshop/2.1"));
        assert!(config.insecure_skip_verify);
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.connect_timeout_secs, Some(1));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ClientConfig::load("/nonexistent/typesense.json").is_err());
    }
}
