//! Report configuration types.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTheme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the viewer's color scheme preference.
    #[default]
    Auto,
}

impl ReportTheme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            ReportTheme::Light => "light",
            ReportTheme::Dark => "dark",
            ReportTheme::Auto => "",
        }
    }
}

impl std::str::FromStr for ReportTheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ReportTheme::Light),
            "dark" => Ok(ReportTheme::Dark),
            "auto" | "system" => Ok(ReportTheme::Auto),
            _ => Err(format!("unknown theme: {}", s)),
        }
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Custom report title. Defaults to the bundle-derived title.
    #[serde(default)]
    pub title: Option<String>,
    /// Color theme.
    #[serde(default)]
    pub theme: ReportTheme,
    /// Width of collapsed long values, in pixels.
    #[serde(default = "default_collapsed_width_px")]
    pub collapsed_width_px: u32,
    /// Minify the generated document.
    #[serde(default)]
    pub minify: bool,
}

fn default_schema_version() -> String {
    "1.0.0".to_string()
}

fn default_collapsed_width_px() -> u32 {
    300
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: None,
            theme: ReportTheme::default(),
            collapsed_width_px: default_collapsed_width_px(),
            minify: false,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: ReportTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.collapsed_width_px == 0 {
            return Err(ReportError::InvalidConfig(
                "collapsed_width_px must be greater than zero".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ReportError::InvalidConfig("title must not be blank".to_string()));
            }
            // The title doubles as the report file stem.
            if title.contains(['/', '\\', '\0']) {
                return Err(ReportError::InvalidConfig(format!(
                    "title must not contain path separators: {:?}",
                    title
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.schema_version, "1.0.0");
        assert_eq!(config.theme, ReportTheme::Auto);
        assert_eq!(config.collapsed_width_px, 300);
        assert!(!config.minify);
        assert!(config.title.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new()
            .with_title("Test Report")
            .with_theme(ReportTheme::Dark)
            .with_minify(true);

        assert_eq!(config.title, Some("Test Report".to_string()));
        assert_eq!(config.theme, ReportTheme::Dark);
        assert!(config.minify);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ReportConfig::from_json(r#"{"theme": "light"}"#).unwrap();
        assert_eq!(config.theme, ReportTheme::Light);
        assert_eq!(config.collapsed_width_px, 300);
    }

    #[test]
    fn test_invalid_width_rejected() {
        let err = ReportConfig::from_json(r#"{"collapsed_width_px": 0}"#).unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = ReportConfig::from_json(r#"{"title": "   "}"#).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_title_with_path_separator_rejected() {
        for json in [
            r#"{"title": "../../outside"}"#,
            r#"{"title": "reports/nested"}"#,
            r#"{"title": "..\\outside"}"#,
        ] {
            let err = ReportConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ReportError::InvalidConfig(_)), "{}", json);
        }
        assert!(ReportConfig::from_json(r#"{"title": "Receipt v1.2"}"#).is_ok());
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("DARK".parse::<ReportTheme>().unwrap(), ReportTheme::Dark);
        assert_eq!("system".parse::<ReportTheme>().unwrap(), ReportTheme::Auto);
        assert!("sepia".parse::<ReportTheme>().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = ReportConfig::default().with_title("Roundtrip");
        let json = config.to_json().unwrap();
        let parsed = ReportConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
