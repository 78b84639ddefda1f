//! Site-wide theme settings.
//!
//! A fixed set of named color tokens plus a font choice from a small fixed
//! catalog. Themes apply globally to the render surface; they are never
//! scoped per component.

use serde::{Deserialize, Serialize};

/// Font catalog available to site themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Inter,
    Roboto,
    Lora,
    Montserrat,
    SpaceGrotesk,
}

impl FontFamily {
    /// CSS `font-family` stack for this font.
    #[must_use]
    pub fn css_stack(self) -> &'static str {
        match self {
            Self::Inter => "'Inter', system-ui, sans-serif",
            Self::Roboto => "'Roboto', system-ui, sans-serif",
            Self::Lora => "'Lora', Georgia, serif",
            Self::Montserrat => "'Montserrat', system-ui, sans-serif",
            Self::SpaceGrotesk => "'Space Grotesk', system-ui, sans-serif",
        }
    }
}

/// The thirteen color tokens plus font family applied to a rendered site.
///
/// Values are CSS colors, stored verbatim. Missing or corrupt stored themes
/// fall back to [`ThemeSettings::default`] at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary: String,
    pub primary_foreground: String,
    pub secondary: String,
    pub secondary_foreground: String,
    pub accent: String,
    pub accent_foreground: String,
    pub background: String,
    pub foreground: String,
    pub card: String,
    pub card_foreground: String,
    pub border: String,
    pub muted: String,
    pub muted_foreground: String,
    pub font_family: FontFamily,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary: "#18181b".to_owned(),
            primary_foreground: "#fafafa".to_owned(),
            secondary: "#f4f4f5".to_owned(),
            secondary_foreground: "#18181b".to_owned(),
            accent: "#2563eb".to_owned(),
            accent_foreground: "#ffffff".to_owned(),
            background: "#ffffff".to_owned(),
            foreground: "#09090b".to_owned(),
            card: "#ffffff".to_owned(),
            card_foreground: "#09090b".to_owned(),
            border: "#e4e4e7".to_owned(),
            muted: "#f4f4f5".to_owned(),
            muted_foreground: "#71717a".to_owned(),
            font_family: FontFamily::Inter,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_theme_round_trips() {
        let theme = ThemeSettings::default();

        let json = serde_json::to_string(&theme).unwrap();
        let back: ThemeSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(back, theme);
    }

    #[test]
    fn test_serde_field_names() {
        let theme = ThemeSettings::default();

        let json = serde_json::to_value(&theme).unwrap();

        assert_eq!(json["primaryForeground"], "#fafafa");
        assert_eq!(json["mutedForeground"], "#71717a");
        assert_eq!(json["fontFamily"], "inter");
    }

    #[test]
    fn test_partial_theme_fills_defaults() {
        let json = r##"{"primary":"#ff0000","fontFamily":"space-grotesk"}"##;

        let theme: ThemeSettings = serde_json::from_str(json).unwrap();

        assert_eq!(theme.primary, "#ff0000");
        assert_eq!(theme.font_family, FontFamily::SpaceGrotesk);
        assert_eq!(theme.background, "#ffffff");
    }

    #[test]
    fn test_font_css_stack() {
        assert!(FontFamily::Lora.css_stack().contains("serif"));
        assert!(FontFamily::Inter.css_stack().contains("Inter"));
    }
}
