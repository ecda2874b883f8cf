//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::{
    parse_hex_color, PaletteConfig, ThemeMode, DEFAULT_ENVIRONMENTAL_COLOR,
    DEFAULT_GOVERNANCE_COLOR, DEFAULT_SOCIAL_COLOR,
};
use crate::dataset::Category;
use crate::rating::Grade;

/// Resolved terminal background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Luma above which the terminal background counts as light
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Resolve `auto` by querying the terminal background.
///
/// Must run before raw mode / alternate screen are entered.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "background detection failed, assuming dark");
                Theme::Dark
            }
        },
    }
}

/// Bar colours for the three ESG categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub environmental: Color,
    pub social: Color,
    pub governance: Color,
}

fn hex_to_color(value: &str) -> Option<Color> {
    parse_hex_color(value).ok().map(|(r, g, b)| Color::Rgb(r, g, b))
}

impl Default for CategoryPalette {
    /// Light green, teal, blue
    fn default() -> Self {
        Self {
            environmental: hex_to_color(DEFAULT_ENVIRONMENTAL_COLOR).unwrap_or(Color::LightGreen),
            social: hex_to_color(DEFAULT_SOCIAL_COLOR).unwrap_or(Color::Cyan),
            governance: hex_to_color(DEFAULT_GOVERNANCE_COLOR).unwrap_or(Color::Blue),
        }
    }
}

impl CategoryPalette {
    /// Apply config overrides; invalid or missing entries keep the default
    pub fn from_config(config: Option<&PaletteConfig>) -> Self {
        let mut palette = Self::default();
        if let Some(config) = config {
            if let Some(color) = config.environmental.as_deref().and_then(hex_to_color) {
                palette.environmental = color;
            }
            if let Some(color) = config.social.as_deref().and_then(hex_to_color) {
                palette.social = color;
            }
            if let Some(color) = config.governance.as_deref().and_then(hex_to_color) {
                palette.governance = color;
            }
        }
        palette
    }

    pub fn color(&self, category: Category) -> Color {
        match category {
            Category::Environmental => self.environmental,
            Category::Social => self.social,
            Category::Governance => self.governance,
        }
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub categories: CategoryPalette,

    // Grade colors (traffic light pattern)
    pub grade_good: Color,
    pub grade_mid: Color,
    pub grade_bad: Color,

    // Text on top of category-coloured bars
    pub bar_value: Color,

    // Styles
    pub header_style: Style,
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub border: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            categories: CategoryPalette::default(),
            grade_good: Color::Green,
            grade_mid: Color::Yellow,
            grade_bad: Color::Red,
            bar_value: Color::Black,
            header_style: Style::new().bold(),
            tab_active_style: Style::new().fg(Color::Cyan).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            muted: Color::Gray,
            title_color: Color::Cyan,
            border: Color::Indexed(238),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            categories: CategoryPalette::default(),
            grade_good: Color::Rgb(0, 120, 0),
            grade_mid: Color::Rgb(160, 110, 0),
            grade_bad: Color::Rgb(180, 0, 0),
            bar_value: Color::Black,
            header_style: Style::new().bold(),
            tab_active_style: Style::new().fg(Color::Blue).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            border: Color::Indexed(250),
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 120, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn for_theme(theme: Theme, palette: Option<&PaletteConfig>) -> Self {
        let mut colors = match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        };
        colors.categories = CategoryPalette::from_config(palette);
        colors
    }

    /// Green for A bands, yellow for B/C, red for D/F
    pub fn grade_color(&self, grade: Grade) -> Color {
        match grade {
            Grade::APlus | Grade::A => self.grade_good,
            Grade::BPlus | Grade::B | Grade::CPlus | Grade::C => self.grade_mid,
            Grade::D | Grade::F => self.grade_bad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_matches_hex() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.environmental, Color::Rgb(0xC5, 0xDC, 0xA0));
        assert_eq!(palette.social, Color::Rgb(0x76, 0xC1, 0xBF));
        assert_eq!(palette.governance, Color::Rgb(0x50, 0x8C, 0xA4));
    }

    #[test]
    fn test_palette_overrides() {
        let config = PaletteConfig {
            environmental: Some("#010203".to_string()),
            social: Some("not-a-colour".to_string()),
            governance: None,
        };
        let palette = CategoryPalette::from_config(Some(&config));
        assert_eq!(palette.color(Category::Environmental), Color::Rgb(1, 2, 3));
        assert_eq!(palette.color(Category::Social), CategoryPalette::default().social);
        assert_eq!(palette.color(Category::Governance), CategoryPalette::default().governance);
    }

    #[test]
    fn test_explicit_theme_modes() {
        assert_eq!(resolve_theme(ThemeMode::Dark), Theme::Dark);
        assert_eq!(resolve_theme(ThemeMode::Light), Theme::Light);
    }

    #[test]
    fn test_grade_colors() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.grade_color(Grade::APlus), Color::Green);
        assert_eq!(colors.grade_color(Grade::C), Color::Yellow);
        assert_eq!(colors.grade_color(Grade::F), Color::Red);
    }
}
