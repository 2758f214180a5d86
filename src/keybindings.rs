//! Keybinding registry: maps actions to key events with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    CycleFocus,
    Back,
    Select,
    CycleSort,
    ResetFilters,
    Reload,
    OpenContact,
    OpenImage,
    CycleTheme,
    ToggleMotion,
    ShowHelp,
    NextField,
    PrevField,
    SubmitForm,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::CycleFocus => "Switch between categories and products",
            Self::Back => "Go back / dismiss",
            Self::Select => "Select category / open product",
            Self::CycleSort => "Cycle sort order",
            Self::ResetFilters => "Reset category and sort",
            Self::Reload => "Reload products",
            Self::OpenContact => "Open contact form",
            Self::OpenImage => "Open product image in browser",
            Self::CycleTheme => "Cycle theme",
            Self::ToggleMotion => "Toggle animations",
            Self::ShowHelp => "Show help",
            Self::NextField => "Next form field",
            Self::PrevField => "Previous form field",
            Self::SubmitForm => "Send message",
        }
    }
}

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Categories,
    Products,
    Detail,
    /// Text entry; Global bindings do not apply so typing reaches the form.
    Contact,
}

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report SHIFT alongside the already-shifted char (and with
    /// BackTab); drop it so `R` matches a binding for `R`.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers - KeyModifiers::SHIFT)
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "PageDown", "Backspace"
/// - Modifier combos: "Ctrl+d", "Ctrl+s"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return match chars.next() {
            None => Some(KeySpec::ctrl(c)),
            Some(_) => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "pagedown" => Some(KeyCode::PageDown),
        "pageup" => Some(KeyCode::PageUp),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s.strip_prefix(['F', 'f']).and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; a
/// context lookup falls back to Global except in [`Context::Contact`].
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Context::*;
        use KeyCode::*;

        let global = [
            (KeySpec::plain(Char('q')), Action::Quit),
            (KeySpec::ctrl('c'), Action::Quit),
            (KeySpec::plain(Char('j')), Action::NavDown),
            (KeySpec::plain(Down), Action::NavDown),
            (KeySpec::plain(Char('k')), Action::NavUp),
            (KeySpec::plain(Up), Action::NavUp),
            (KeySpec::ctrl('d'), Action::PageDown),
            (KeySpec::plain(PageDown), Action::PageDown),
            (KeySpec::ctrl('u'), Action::PageUp),
            (KeySpec::plain(PageUp), Action::PageUp),
            (KeySpec::plain(Tab), Action::CycleFocus),
            (KeySpec::plain(Esc), Action::Back),
            (KeySpec::plain(Enter), Action::Select),
            (KeySpec::plain(Char('s')), Action::CycleSort),
            (KeySpec::plain(Char('x')), Action::ResetFilters),
            (KeySpec::plain(Char('r')), Action::Reload),
            (KeySpec::plain(Char('c')), Action::OpenContact),
            (KeySpec::plain(Char('t')), Action::CycleTheme),
            (KeySpec::plain(Char('m')), Action::ToggleMotion),
            (KeySpec::plain(Char('?')), Action::ShowHelp),
        ];
        for (key, action) in global {
            self.bind(Global, key, action);
        }

        // Image opening only makes sense with a product in view
        self.bind(Products, KeySpec::plain(Char('o')), Action::OpenImage);
        self.bind(Detail, KeySpec::plain(Char('o')), Action::OpenImage);

        // Contact form: everything else is text input
        self.bind(Contact, KeySpec::plain(Esc), Action::Back);
        self.bind(Contact, KeySpec::ctrl('c'), Action::Quit);
        self.bind(Contact, KeySpec::plain(Tab), Action::NextField);
        self.bind(Contact, KeySpec::plain(Down), Action::NextField);
        self.bind(Contact, KeySpec::plain(BackTab), Action::PrevField);
        self.bind(Contact, KeySpec::plain(Up), Action::PrevField);
        self.bind(Contact, KeySpec::ctrl('s'), Action::SubmitForm);
    }

    /// Apply user overrides from config. Returns warnings for invalid entries.
    ///
    /// An override replaces every default key for the action, keeping the
    /// contexts it was bound in.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key in a context, falling back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }
        match context {
            Context::Global | Context::Contact => None,
            _ => self.lookup.get(&(Context::Global, key)).copied(),
        }
    }

    /// All bindings for the help screen as (context, key, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "cycle_focus" | "focus" => Some(Action::CycleFocus),
        "back" => Some(Action::Back),
        "select" | "enter" => Some(Action::Select),
        "cycle_sort" | "sort" => Some(Action::CycleSort),
        "reset_filters" | "reset" => Some(Action::ResetFilters),
        "reload" | "refresh" => Some(Action::Reload),
        "open_contact" | "contact" => Some(Action::OpenContact),
        "open_image" | "open" => Some(Action::OpenImage),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "toggle_motion" | "motion" => Some(Action::ToggleMotion),
        "show_help" | "help" => Some(Action::ShowHelp),
        "next_field" => Some(Action::NextField),
        "prev_field" => Some(Action::PrevField),
        "submit_form" | "submit" | "send" => Some(Action::SubmitForm),
        _ => None,
    }
}
