//! Theme application.
//!
//! Emits the theme's color tokens as CSS custom properties into a style
//! sink. This is the only place theme values touch the render surface;
//! callers decide where the CSS goes (the page shell embeds it in a
//! `<style>` element).

use std::fmt::Write;

use tessera_site::ThemeSettings;

use crate::escape::escape_html;

/// Write the theme as CSS custom properties plus base body rules.
pub fn write_theme_css(theme: &ThemeSettings, out: &mut String) {
    let tokens = [
        ("primary", &theme.primary),
        ("primary-foreground", &theme.primary_foreground),
        ("secondary", &theme.secondary),
        ("secondary-foreground", &theme.secondary_foreground),
        ("accent", &theme.accent),
        ("accent-foreground", &theme.accent_foreground),
        ("background", &theme.background),
        ("foreground", &theme.foreground),
        ("card", &theme.card),
        ("card-foreground", &theme.card_foreground),
        ("border", &theme.border),
        ("muted", &theme.muted),
        ("muted-foreground", &theme.muted_foreground),
    ];

    out.push_str(":root{");
    for (name, value) in tokens {
        write!(out, "--{name}:{};", escape_html(value)).unwrap();
    }
    write!(out, "--font-family:{};", theme.font_family.css_stack()).unwrap();
    out.push_str("}");
    out.push_str(
        "body{margin:0;background:var(--background);color:var(--foreground);font-family:var(--font-family);}",
    );
}

/// Convenience wrapper returning the CSS as a string.
#[must_use]
pub fn theme_css(theme: &ThemeSettings) -> String {
    let mut out = String::new();
    write_theme_css(theme, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_all_thirteen_tokens() {
        let css = theme_css(&ThemeSettings::default());

        for token in [
            "--primary:",
            "--primary-foreground:",
            "--secondary:",
            "--secondary-foreground:",
            "--accent:",
            "--accent-foreground:",
            "--background:",
            "--foreground:",
            "--card:",
            "--card-foreground:",
            "--border:",
            "--muted:",
            "--muted-foreground:",
        ] {
            assert!(css.contains(token), "missing {token}");
        }
    }

    #[test]
    fn test_emits_font_stack() {
        let css = theme_css(&ThemeSettings::default());

        assert!(css.contains("--font-family:'Inter'"));
        assert!(css.contains("font-family:var(--font-family)"));
    }

    #[test]
    fn test_escapes_hostile_color_value() {
        let theme = ThemeSettings {
            primary: "</style><script>".to_owned(),
            ..ThemeSettings::default()
        };

        let css = theme_css(&theme);

        assert!(!css.contains("<script>"));
    }
}
