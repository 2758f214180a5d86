use crate::app::{App, View};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.feed.state().loading_more {
        Cow::Owned(format!("{} Loading more products...", app.motion.spinner()))
    } else {
        match app.view {
            View::Catalog => Cow::Borrowed(
                "[Tab]focus [Enter]open [s]ort [x]reset [r]eload [c]ontact [t]heme [m]otion [?]help [q]uit",
            ),
            View::Detail => Cow::Borrowed("[Esc]back [o]pen image [?]help [q]uit"),
            View::Contact => Cow::Borrowed("[Tab/Shift+Tab]field [Ctrl+s]send [Esc]back"),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
