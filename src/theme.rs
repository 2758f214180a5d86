//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category list --
    pub category_normal: Style,
    pub category_selected: Style,
    pub category_active: Style,

    // -- Product cards --
    pub card_name: Style,
    pub card_selected: Style,
    pub card_category: Style,
    pub card_price: Style,
    pub card_rating: Style,
    pub card_tag: Style,
    pub card_description: Style,
    pub card_muted: Style,

    // -- Product detail --
    pub detail_heading: Style,
    pub detail_label: Style,
    pub detail_body: Style,

    // -- Contact form --
    pub form_label: Style,
    pub form_input: Style,
    pub form_input_focused: Style,
    pub form_placeholder: Style,
    pub banner_success: Style,
    pub banner_error: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub progress_bar: Style,
    pub spinner: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            category_normal: Style::default(),
            category_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            card_name: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_category: Style::default().fg(Color::Cyan),
            card_price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            card_rating: Style::default().fg(Color::Yellow),
            card_tag: Style::default().fg(Color::Black).bg(Color::Yellow),
            card_description: Style::default().fg(Color::Gray),
            card_muted: Style::default().fg(Color::DarkGray),

            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_label: Style::default().fg(Color::DarkGray),
            detail_body: Style::default(),

            form_label: Style::default().add_modifier(Modifier::BOLD),
            form_input: Style::default(),
            form_input_focused: Style::default().fg(Color::Cyan),
            form_placeholder: Style::default().fg(Color::DarkGray),
            banner_success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            banner_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            progress_bar: Style::default().fg(Color::Green),
            spinner: Style::default().fg(Color::Yellow),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            category_normal: Style::default().fg(Color::Black),
            category_selected: Style::default().bg(Color::Blue).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            card_name: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_category: Style::default().fg(Color::Blue),
            card_price: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            card_rating: Style::default().fg(Color::Magenta),
            card_tag: Style::default().fg(Color::White).bg(Color::Magenta),
            card_description: Style::default().fg(Color::DarkGray),
            card_muted: Style::default().fg(Color::DarkGray),

            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_label: Style::default().fg(Color::DarkGray),
            detail_body: Style::default().fg(Color::Black),

            form_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            form_input: Style::default().fg(Color::Black),
            form_input_focused: Style::default().fg(Color::Blue),
            form_placeholder: Style::default().fg(Color::DarkGray),
            banner_success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            banner_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            progress_bar: Style::default().fg(Color::Blue),
            spinner: Style::default().fg(Color::Magenta),
        }
    }
}

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, resolves role names (e.g. `"card_price"`) to
/// their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 25] = [
    "category_normal",
    "category_selected",
    "category_active",
    "card_name",
    "card_selected",
    "card_category",
    "card_price",
    "card_rating",
    "card_tag",
    "card_description",
    "card_muted",
    "detail_heading",
    "detail_label",
    "detail_body",
    "form_label",
    "form_input",
    "form_input_focused",
    "form_placeholder",
    "banner_success",
    "banner_error",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "progress_bar",
    "spinner",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 25] = [
            p.category_normal,
            p.category_selected,
            p.category_active,
            p.card_name,
            p.card_selected,
            p.card_category,
            p.card_price,
            p.card_rating,
            p.card_tag,
            p.card_description,
            p.card_muted,
            p.detail_heading,
            p.detail_label,
            p.detail_body,
            p.form_label,
            p.form_input,
            p.form_input_focused,
            p.form_placeholder,
            p.banner_success,
            p.banner_error,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.progress_bar,
            p.spinner,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
