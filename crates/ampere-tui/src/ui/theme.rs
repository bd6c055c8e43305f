//! Visual theme and color palette

use ampere_core::{SettingsStore, ThemeName};
use ratatui::style::{Color, Modifier, Style};

/// Resolved color palette for one theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,

    // Surfaces
    pub background: Color,
    pub header_bg: Color,
    pub header_fg: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub spinner: Color,

    // Controls
    pub border: Color,
    pub border_focused: Color,
    pub toggle_bg: Color,
    pub toggle_fg: Color,
    pub pay_bg: Color,
    pub pay_fg: Color,
    pub input_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolve(ThemeName::default())
    }
}

impl Theme {
    /// Palette for the given theme name
    pub fn resolve(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Palette for the theme chosen in the settings
    pub fn from_settings<S: SettingsStore + ?Sized>(settings: &S) -> Self {
        Self::resolve(settings.settings().theme)
    }

    /// Dark palette: black background, white text
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            background: Color::Black,
            header_bg: Color::Rgb(38, 19, 57), // #261339
            header_fg: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575
            success: Color::Rgb(76, 175, 80),          // #4CAF50
            warning: Color::Rgb(255, 152, 0),          // #FF9800
            danger: Color::Rgb(244, 67, 54),           // #F44336
            spinner: Color::Rgb(0, 0, 255),
            border: Color::Rgb(66, 66, 66),
            border_focused: Color::White,
            toggle_bg: Color::White,
            toggle_fg: Color::Black,
            pay_bg: Color::Rgb(255, 165, 0), // orange
            pay_fg: Color::White,
            input_bg: Color::Rgb(33, 33, 33),
        }
    }

    /// Light palette: terminal default background, dark text
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            background: Color::Reset,
            header_bg: Color::Rgb(92, 99, 216), // rgba(92, 99, 216, 1)
            header_fg: Color::White,
            text_primary: Color::Black,
            text_secondary: Color::Rgb(66, 66, 66),
            text_muted: Color::Gray,
            success: Color::Rgb(56, 142, 60),
            warning: Color::Rgb(230, 81, 0),
            danger: Color::Rgb(198, 40, 40),
            spinner: Color::Rgb(0, 0, 255),
            border: Color::Gray,
            border_focused: Color::Black,
            toggle_bg: Color::Black,
            toggle_fg: Color::White,
            pay_bg: Color::Rgb(255, 165, 0),
            pay_fg: Color::White,
            input_bg: Color::Rgb(238, 238, 238),
        }
    }

    /// Whole-screen base style
    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.text_primary)
    }

    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Field label ("Description:")
    pub fn label(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    /// Field value
    pub fn value(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Large amount line
    pub fn amount(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Header bar style
    pub fn header(&self) -> Style {
        Style::default().bg(self.header_bg).fg(self.header_fg)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Get success style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get warning style
    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Progress indicator
    pub fn spinner(&self) -> Style {
        Style::default()
            .fg(self.spinner)
            .add_modifier(Modifier::BOLD)
    }

    /// Amount mode toggle button
    pub fn toggle_button(&self) -> Style {
        Style::default().bg(self.toggle_bg).fg(self.toggle_fg)
    }

    /// Pay button
    pub fn pay_button(&self) -> Style {
        Style::default()
            .bg(self.pay_bg)
            .fg(self.pay_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.text_primary).bg(self.input_bg)
        } else {
            Style::default().fg(self.text_secondary).bg(self.input_bg)
        }
    }

    /// Placeholder text inside an empty input
    pub fn placeholder(&self) -> Style {
        Style::default().fg(Color::Gray).bg(self.input_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name() {
        assert_eq!(Theme::resolve(ThemeName::Dark), Theme::dark());
        assert_eq!(Theme::resolve(ThemeName::Light), Theme::light());
        assert_eq!(Theme::default().name, ThemeName::Dark);
    }

    #[test]
    fn test_from_settings_follows_theme_name() {
        let settings = ampere_core::Settings {
            theme: ThemeName::Light,
            ..Default::default()
        };
        assert_eq!(Theme::from_settings(&settings), Theme::light());
    }

    #[test]
    fn test_toggle_button_inverts_with_theme() {
        let dark = Theme::dark().toggle_button();
        let light = Theme::light().toggle_button();
        assert_eq!(dark.bg, Some(Color::White));
        assert_eq!(dark.fg, Some(Color::Black));
        assert_eq!(light.bg, Some(Color::Black));
        assert_eq!(light.fg, Some(Color::White));
    }
}
