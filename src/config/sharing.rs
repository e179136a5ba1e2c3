//! Share-link configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Share-link configuration
///
/// Completed rankings are exposed at `{base_url}/share/alltime/{token}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SharingConfig {
    /// Public base URL used to build share links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl SharingConfig {
    /// Build the public share URL for a share token.
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/share/alltime/{}", self.base_url.trim_end_matches('/'), token)
    }

    /// Validate sharing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SHARING_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidShareBaseUrl);
        }
        Ok(())
    }
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5173".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_joins_cleanly() {
        let config = SharingConfig {
            base_url: "https://goatboard.app/".to_string(),
        };
        assert_eq!(
            config.share_url("abc123"),
            "https://goatboard.app/share/alltime/abc123"
        );
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = SharingConfig {
            base_url: "ftp://goatboard.app".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_base_url_is_valid() {
        assert!(SharingConfig::default().validate().is_ok());
    }
}
