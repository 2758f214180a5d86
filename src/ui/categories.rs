use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::util::{strip_control_chars, truncate_to_width};

/// Render the category filter panel. Entry 0 is "All".
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Categories;
    let active = app.feed.state().category.as_deref();
    let inner_width = usize::from(area.width.saturating_sub(4));

    let entries = std::iter::once((None, "All")).chain(
        app.categories
            .iter()
            .map(|c| (Some(c.id.as_str()), c.name.as_str())),
    );

    let items: Vec<ListItem> = entries
        .enumerate()
        .map(|(i, (id, name))| {
            let is_active = id == active;
            let style = if is_focused && i == app.category_cursor {
                app.style("category_selected")
            } else if is_active {
                app.style("category_active")
            } else {
                app.style("category_normal")
            };
            let marker = if is_active { "● " } else { "  " };
            let name = strip_control_chars(name);
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate_to_width(&name, inner_width).into_owned(), style),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = if app.categories_loading {
        format!(" Categories {} ", app.motion.spinner())
    } else {
        " Categories ".to_string()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.category_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
