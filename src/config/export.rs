//! Report export configuration
//!
//! Settings for the headless-browser PDF exporter: where report pages are
//! served, which Chromium binary to launch, and the per-step wait budgets
//! of the export pipeline.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Report export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Base URL of the rendered report views, e.g. "https://app.talentscope.io/reports"
    pub report_base_url: String,

    /// Explicit Chromium/Chrome executable path (auto-detected when unset)
    pub chrome_executable: Option<String>,

    /// Selector wait budget in seconds
    #[serde(default = "default_selector_timeout")]
    pub selector_timeout_secs: u64,

    /// Image-load wait budget in seconds
    #[serde(default = "default_image_timeout")]
    pub image_timeout_secs: u64,

    /// Page-count stability poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ExportConfig {
    /// Report URL for one target
    pub fn report_url(&self, target_id: &str) -> String {
        format!("{}/{}", self.report_base_url.trim_end_matches('/'), target_id)
    }

    /// Selector wait budget as Duration
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    /// Image-load wait budget as Duration
    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    /// Stability poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.report_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("EXPORT_REPORT_BASE_URL"));
        }
        if !self.report_base_url.starts_with("http://")
            && !self.report_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidReportBaseUrl);
        }
        if self.selector_timeout_secs == 0 || self.selector_timeout_secs > 120 {
            return Err(ValidationError::InvalidExportTimeout);
        }
        if self.image_timeout_secs == 0 || self.image_timeout_secs > 60 {
            return Err(ValidationError::InvalidExportTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            report_base_url: String::new(),
            chrome_executable: None,
            selector_timeout_secs: default_selector_timeout(),
            image_timeout_secs: default_image_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_selector_timeout() -> u64 {
    30
}

fn default_image_timeout() -> u64 {
    5
}

fn default_poll_interval_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.selector_timeout_secs, 30);
        assert_eq!(config.image_timeout_secs, 5);
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[test]
    fn test_report_url_joins_without_double_slash() {
        let config = ExportConfig {
            report_base_url: "https://app.example.com/reports/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.report_url("abc-123"),
            "https://app.example.com/reports/abc-123"
        );
    }

    #[test]
    fn test_validation_missing_base_url() {
        let config = ExportConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_relative_base_url() {
        let config = ExportConfig {
            report_base_url: "/reports".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ExportConfig {
            report_base_url: "https://app.example.com/reports".to_string(),
            selector_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = ExportConfig {
            report_base_url: "https://app.example.com/reports".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
