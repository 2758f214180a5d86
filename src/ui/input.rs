//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry for the current
//! context. In the contact form, keys without a binding are typed into the
//! focused field.

use crate::app::{App, AppEvent, Focus, View};
use crate::contact::Field;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_selected_image, spawn_feed_load, submit_contact};
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    let context = app.key_context();
    let action = app.keybindings.action_for_key(code, modifiers, context);

    match (context, action) {
        (_, Some(action)) => handle_action(app, action, event_tx),
        (KbContext::Contact, None) => {
            handle_text_entry(app, code, modifiers);
            Action::Continue
        }
        (_, None) => Action::Continue,
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_action(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::PageDown => app.page_down(),
        KbAction::PageUp => app.page_up(),
        KbAction::CycleFocus => {
            if app.view == View::Catalog {
                app.cycle_focus();
            }
        }
        KbAction::Back => match app.view {
            View::Detail | View::Contact => app.view = View::Catalog,
            View::Catalog => app.focus = Focus::Products,
        },
        KbAction::Select => handle_select(app, event_tx),
        KbAction::CycleSort => {
            let label = app.cycle_sort();
            app.set_status(format!("Sort: {}", label));
        }
        KbAction::ResetFilters => {
            let ticket = app.reset_filters();
            spawn_feed_load(app, ticket, event_tx);
            app.set_status("Filters reset");
        }
        KbAction::Reload => {
            let ticket = app.feed.load_initial();
            spawn_feed_load(app, ticket, event_tx);
            app.set_status("Reloading...");
        }
        KbAction::OpenContact => app.view = View::Contact,
        KbAction::OpenImage => open_selected_image(app),
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ToggleMotion => {
            let reduced = app.toggle_motion();
            app.set_status(if reduced {
                "Reduced motion on"
            } else {
                "Reduced motion off"
            });
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::NextField => app.contact.focus_next(),
        KbAction::PrevField => app.contact.focus_prev(),
        KbAction::SubmitForm => submit_contact(app, event_tx),
    }
    Action::Continue
}

fn handle_select(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    match (app.view, app.focus) {
        (View::Catalog, Focus::Categories) => {
            let ticket = app.select_category_at_cursor();
            spawn_feed_load(app, ticket, event_tx);
            app.focus = Focus::Products;
        }
        (View::Catalog, Focus::Products) => {
            if app.selected_record().is_some() {
                app.view = View::Detail;
            }
        }
        _ => {}
    }
}

/// Typing into the focused contact field.
fn handle_text_entry(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return;
    }
    match code {
        KeyCode::Char(c) => app.contact.insert_char(c),
        KeyCode::Enter if app.contact.focus() == Field::Message => app.contact.insert_char('\n'),
        KeyCode::Enter => app.contact.focus_next(),
        KeyCode::Backspace => app.contact.backspace(),
        _ => {}
    }
}
