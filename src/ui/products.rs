//! Product card list with the load-more sentinel and scroll progress.

use crate::app::{App, Focus, CARD_HEIGHT};
use crate::catalog::{DisplayRecord, SENTINEL_ROWS};
use crate::motion::scroll_progress;
use crate::util::{display_width, pad_to_width, single_line, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 10 || area.height < 4 {
        return;
    }

    let border_style = if app.focus == Focus::Products {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title(app));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    let (gauge_area, list_area) = (rows[0], rows[1]);

    app.list_viewport_rows = usize::from(list_area.height);

    if app.feed.state().records.is_empty() {
        render_empty(f, app, list_area);
        return;
    }

    let content_rows = app.content_rows();
    let progress = scroll_progress(
        app.list_offset,
        app.list_viewport_rows,
        content_rows + usize::from(SENTINEL_ROWS),
    );
    let gauge = LineGauge::default()
        .filled_style(app.style("progress_bar"))
        .unfilled_style(app.style("card_muted"))
        .label(format!("{:>3.0}%", progress))
        .ratio(progress / 100.0);
    f.render_widget(gauge, gauge_area);

    let width = usize::from(list_area.width);
    let view = app.feed.view();
    let revealed = app.motion.revealed(view.len());
    let mut lines: Vec<Line> = Vec::with_capacity(app.list_viewport_rows);

    for row in app.list_offset..app.list_offset + app.list_viewport_rows {
        let card = row / CARD_HEIGHT;
        if let Some(record) = view.get(card) {
            if card >= revealed {
                lines.push(Line::default());
            } else {
                let selected = card == app.selected_product && app.focus == Focus::Products;
                lines.push(card_line(app, record, row % CARD_HEIGHT, selected, width));
            }
        } else if row - content_rows < usize::from(SENTINEL_ROWS) {
            lines.push(sentinel_line(app, row - content_rows));
        } else {
            break;
        }
    }

    f.render_widget(Paragraph::new(lines), list_area);
}

/// "Products · Fish · Top Rated · Showing 12 of 40"
fn title(app: &App) -> String {
    let (shown, total) = app.feed.showing();
    let state = app.feed.state();
    let mut title = format!(
        " Products · {} · {} · Showing {} of {} ",
        app.active_category_name(),
        state.sort.label(),
        shown,
        total
    );
    if state.loading {
        title.push_str(app.motion.spinner());
        title.push(' ');
    }
    title
}

/// One row of a product card.
fn card_line<'a>(
    app: &App,
    record: &'a DisplayRecord,
    row: usize,
    selected: bool,
    width: usize,
) -> Line<'a> {
    let base = if selected {
        app.style("card_selected")
    } else {
        Style::default()
    };
    let marker = if selected { "▌" } else { " " };
    let body = width.saturating_sub(2);

    let line = match row {
        0 => {
            let price = record.price_label();
            let name_width = body.saturating_sub(display_width(&price) + 1);
            Line::from(vec![
                Span::raw(marker),
                Span::styled(pad_to_width(&record.name, name_width), app.style("card_name")),
                Span::raw(" "),
                Span::styled(price, app.style("card_price")),
            ])
        }
        1 => {
            let stars = format!("★ {:.1} ({})", record.rating, record.reviews);
            let tag = format!(" {} ", record.tag);
            let category_width = body.saturating_sub(display_width(&stars) + display_width(&tag) + 4);
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    truncate_to_width(&record.category, category_width).into_owned(),
                    app.style("card_category"),
                ),
                Span::styled(" · ", app.style("card_muted")),
                Span::styled(stars, app.style("card_rating")),
                Span::raw(" "),
                Span::styled(tag, app.style("card_tag")),
            ])
        }
        2 => {
            let description = single_line(&record.description);
            Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    truncate_to_width(&description, body).into_owned(),
                    app.style("card_description"),
                ),
            ])
        }
        _ => Line::default(),
    };
    line.patch_style(base)
}

fn sentinel_line(app: &App, row: usize) -> Line<'static> {
    if row != 0 {
        return Line::default();
    }
    let state = app.feed.state();
    let text = if state.loading_more {
        format!("{} Loading more...", app.motion.spinner())
    } else if state.page.is_some_and(|p| p.has_next) {
        "Scroll for more".to_string()
    } else {
        "End of catalog".to_string()
    };
    Line::from(Span::styled(text, app.style("card_muted"))).alignment(Alignment::Center)
}

fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let lines = if app.feed.state().loading {
        vec![Line::from(Span::styled(
            format!("{} Loading products...", app.motion.spinner()),
            app.style("spinner"),
        ))]
    } else {
        vec![
            Line::from(Span::styled("No products found", app.style("card_name"))),
            Line::default(),
            Line::from(Span::styled(
                "Press x to reset filters or r to reload",
                app.style("card_muted"),
            )),
        ]
    };
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let area = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
