//! Theme data model
//!
//! A [`Theme`] always has every role populated. Slots that only make sense
//! for a palette-derived theme (accents, badges, gradients, overlays) live in
//! [`PaletteSlots`] and are absent from the built-in default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::theme::{defaults, GRADIENT_ANGLE};

/// Named UI role of a theme color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeRole {
    Primary,
    Secondary,
    Background,
    TextOnBackground,
    Surface,
    MutedText,
    Shadow,
    DarkAccent,
    Border,
    BorderHover,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 10] = [
        ThemeRole::Primary,
        ThemeRole::Secondary,
        ThemeRole::Background,
        ThemeRole::TextOnBackground,
        ThemeRole::Surface,
        ThemeRole::MutedText,
        ThemeRole::Shadow,
        ThemeRole::DarkAccent,
        ThemeRole::Border,
        ThemeRole::BorderHover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeRole::Primary => "primary",
            ThemeRole::Secondary => "secondary",
            ThemeRole::Background => "background",
            ThemeRole::TextOnBackground => "textOnBackground",
            ThemeRole::Surface => "surface",
            ThemeRole::MutedText => "mutedText",
            ThemeRole::Shadow => "shadow",
            ThemeRole::DarkAccent => "darkAccent",
            ThemeRole::Border => "border",
            ThemeRole::BorderHover => "borderHover",
        }
    }
}

impl fmt::Display for ThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear gradient between two theme colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
    /// Angle in degrees
    pub angle: u16,
}

impl Gradient {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            angle: GRADIENT_ANGLE,
        }
    }

    /// CSS `linear-gradient(...)` form
    pub fn css(&self) -> String {
        format!("linear-gradient({}deg, {}, {})", self.angle, self.from, self.to)
    }
}

/// Extra colors derived from a non-empty palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSlots {
    pub accents: [String; 4],
    pub badges: [String; 5],
    pub gradients: [Gradient; 3],
    /// `#rrggbbaa` translucent variants of the first three palette colors
    pub overlays: [String; 3],
    /// Source palette hexes, in palette order
    pub palette: Vec<String>,
}

/// Named UI colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text_on_background: String,
    pub surface: String,
    pub muted_text: String,
    pub shadow: String,
    pub dark_accent: String,
    pub border: String,
    pub border_hover: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<PaletteSlots>,
}

impl Default for Theme {
    /// The built-in theme used when no palette data is available
    fn default() -> Self {
        Self {
            primary: defaults::PRIMARY.to_string(),
            secondary: defaults::SECONDARY.to_string(),
            background: defaults::BACKGROUND.to_string(),
            text_on_background: defaults::TEXT_ON_BACKGROUND.to_string(),
            surface: defaults::SURFACE.to_string(),
            muted_text: defaults::MUTED_TEXT.to_string(),
            shadow: defaults::SHADOW.to_string(),
            dark_accent: defaults::DARK_ACCENT.to_string(),
            border: defaults::BORDER.to_string(),
            border_hover: defaults::BORDER_HOVER.to_string(),
            slots: None,
        }
    }
}

impl Theme {
    /// Color assigned to a role
    pub fn role(&self, role: ThemeRole) -> &str {
        match role {
            ThemeRole::Primary => &self.primary,
            ThemeRole::Secondary => &self.secondary,
            ThemeRole::Background => &self.background,
            ThemeRole::TextOnBackground => &self.text_on_background,
            ThemeRole::Surface => &self.surface,
            ThemeRole::MutedText => &self.muted_text,
            ThemeRole::Shadow => &self.shadow,
            ThemeRole::DarkAccent => &self.dark_accent,
            ThemeRole::Border => &self.border,
            ThemeRole::BorderHover => &self.border_hover,
        }
    }

    pub fn role_mut(&mut self, role: ThemeRole) -> &mut String {
        match role {
            ThemeRole::Primary => &mut self.primary,
            ThemeRole::Secondary => &mut self.secondary,
            ThemeRole::Background => &mut self.background,
            ThemeRole::TextOnBackground => &mut self.text_on_background,
            ThemeRole::Surface => &mut self.surface,
            ThemeRole::MutedText => &mut self.muted_text,
            ThemeRole::Shadow => &mut self.shadow,
            ThemeRole::DarkAccent => &mut self.dark_accent,
            ThemeRole::Border => &mut self.border,
            ThemeRole::BorderHover => &mut self.border_hover,
        }
    }

    /// `(role, color)` pairs in [`ThemeRole::ALL`] order
    pub fn roles(&self) -> impl Iterator<Item = (ThemeRole, &str)> + '_ {
        ThemeRole::ALL.into_iter().map(move |role| (role, self.role(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_values() {
        let theme = Theme::default();
        assert_eq!(theme.primary, "#667eea");
        assert_eq!(theme.secondary, "#764ba2");
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.text_on_background, "#2d3748");
        assert_eq!(theme.border_hover, "#cbd5e0");
        assert!(theme.slots.is_none());
    }

    #[test]
    fn test_role_names_match_serialized_keys() {
        let json = serde_json::to_value(Theme::default()).unwrap();
        for (role, color) in Theme::default().roles() {
            assert_eq!(json[role.as_str()], color, "role {}", role);
        }
        assert!(json.get("slots").is_none());
    }

    #[test]
    fn test_role_mut() {
        let mut theme = Theme::default();
        *theme.role_mut(ThemeRole::Border) = "#000000".to_string();
        assert_eq!(theme.role(ThemeRole::Border), "#000000");
    }

    #[test]
    fn test_gradient_css() {
        let gradient = Gradient::new("#fa0000", "#0000fa");
        assert_eq!(gradient.css(), "linear-gradient(135deg, #fa0000, #0000fa)");
    }

    #[test]
    fn test_theme_json_round_trip() {
        let theme = Theme::default();
        let json = serde_json::to_string(&theme).unwrap();
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(theme, back);
    }
}
