//! Contact form view: four inputs and the submit banner.

use crate::app::App;
use crate::contact::{Field, SubmitStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 10 || area.height < 8 {
        return;
    }

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Contact Us ");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    for (field, chunk) in Field::ALL.into_iter().zip(chunks.iter()) {
        render_input(f, app, field, *chunk);
    }
    render_banner(f, app, chunks[4]);
}

fn render_input(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let form = &app.contact;
    let focused = form.focus() == field;
    let value = form.value(field);

    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", field.label()), app.style("form_label")));

    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(
            field.placeholder(),
            app.style("form_placeholder"),
        ))]
    } else {
        let style = if focused {
            app.style("form_input_focused")
        } else {
            app.style("form_input")
        };
        value
            .split('\n')
            .map(|l| Line::from(Span::styled(l, style)))
            .collect()
    };
    if focused && !form.is_submitting() {
        if value.is_empty() {
            lines = vec![Line::from("_")];
        } else if let Some(last) = lines.last_mut() {
            last.push_span(Span::raw("_"));
        }
    }

    // Keep the end of a long message in view
    let visible = usize::from(area.height.saturating_sub(2));
    let scroll = lines.len().saturating_sub(visible);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn render_banner(f: &mut Frame, app: &App, area: Rect) {
    let form = &app.contact;
    let line = if form.is_submitting() {
        Line::from(Span::styled(
            format!("{} Sending...", app.motion.spinner()),
            app.style("spinner"),
        ))
    } else {
        match form.status() {
            SubmitStatus::Success { message, .. } => {
                Line::from(Span::styled(format!("✓ {}", message), app.style("banner_success")))
            }
            SubmitStatus::Error(message) => {
                Line::from(Span::styled(format!("✗ {}", message), app.style("banner_error")))
            }
            SubmitStatus::Idle => Line::from(Span::styled(
                "Ctrl+s to send, Tab to move between fields",
                app.style("card_muted"),
            )),
        }
    };
    f.render_widget(Paragraph::new(line), area);
}
