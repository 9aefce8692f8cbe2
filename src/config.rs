// src/config.rs
use quire_layout::LayoutSettings;
use quire_style::{FontChoice, MarginsInches};
use quire_types::PageSize;
use serde::{Deserialize, Serialize};

/// The user-facing export options, as read from a JSON configuration file.
///
/// Every field is optional in the file:
///
/// ```json
/// { "style": "mla", "font": "sans", "margins": { "left": 1.5 } }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub style: String,
    pub font: FontChoice,
    pub margins: MarginsInches,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            style: "apa".to_string(),
            font: FontChoice::Serif,
            margins: MarginsInches::default(),
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Page geometry for this configuration. Margins are clamped here.
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            page: PageSize::LETTER,
            margins: self.margins.to_points(),
            font: self.font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ExportConfig::from_json("{}").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.style, "apa");
        assert_eq!(config.font, FontChoice::Serif);
    }

    #[test]
    fn test_partial_margins_keep_remaining_sides() {
        let config =
            ExportConfig::from_json(r#"{"style":"mla","font":"sans","margins":{"left":1.5}}"#)
                .unwrap();
        assert_eq!(config.style, "mla");
        assert_eq!(config.font, FontChoice::Sans);
        assert_eq!(config.margins.left, 1.5);
        assert_eq!(config.margins.top, 1.0);
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        assert!(ExportConfig::from_json(r#"{"font":"comic"}"#).is_err());
    }

    #[test]
    fn test_settings_clamp_margins_into_points() {
        let config = ExportConfig {
            margins: MarginsInches {
                top: 0.0,
                right: 1.0,
                bottom: 10.0,
                left: 0.5,
            },
            ..Default::default()
        };
        let settings = config.layout_settings();
        assert_eq!(settings.page, PageSize::LETTER);
        assert_eq!(settings.margins.top, 18.0);
        assert_eq!(settings.margins.right, 72.0);
        assert_eq!(settings.margins.bottom, 216.0);
        assert_eq!(settings.margins.left, 36.0);
    }
}
