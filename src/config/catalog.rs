//! Item catalog configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Item catalog configuration
///
/// Points at the career-stats CSV the canonical ranked catalog is built from.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to the career-stats CSV file
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.csv_path.is_empty() {
            return Err(ValidationError::MissingRequired("CATALOG_CSV_PATH"));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

fn default_csv_path() -> String {
    "data/all_time_careers.csv".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.csv_path, "data/all_time_careers.csv");
    }

    #[test]
    fn test_validation_empty_path() {
        let config = CatalogConfig {
            csv_path: String::new(),
        };
        assert!(config.validate().is_err());
    }
}
