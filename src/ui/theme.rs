//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use serde::Deserialize;

use crate::data::Tone;

/// Which theme to use, as set in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Pick from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for a focusing child.
    pub focusing: Color,
    /// Color for partial focus.
    pub partial: Color,
    /// Color for a distracted child.
    pub not_focusing: Color,
    /// Color for the error state.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headings.
    pub header: Style,
    /// Added on top of a field's style while it pulses.
    pub pulse: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            focusing: Color::Green,
            partial: Color::Yellow,
            not_focusing: Color::Red,
            error: Color::LightRed,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            pulse: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            focusing: Color::Green,
            partial: Color::Yellow,
            not_focusing: Color::Red,
            error: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            pulse: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Get style for a field tone
    pub fn tone_style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Focusing => Style::default().fg(self.focusing),
            Tone::Partial => Style::default().fg(self.partial),
            Tone::NotFocusing => Style::default().fg(self.not_focusing),
            Tone::Neutral => Style::default(),
            Tone::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a field, with the pulse highlight while `pulsing`.
    pub fn field_style(&self, tone: Tone, pulsing: bool) -> Style {
        let style = self.tone_style(tone);
        if pulsing {
            style.patch(self.pulse)
        } else {
            style
        }
    }
}
