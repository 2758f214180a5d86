use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the selected product with every field of its record.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(" Product ");

    let Some(record) = app.selected_record() else {
        f.render_widget(
            Paragraph::new("No product selected").block(block),
            area,
        );
        return;
    };

    let label = app.style("detail_label");
    let field = |name: &'static str, value: String, role: &str| {
        Line::from(vec![
            Span::styled(format!("{:<10}", name), label),
            Span::styled(value, app.style(role)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(record.name.clone(), app.style("detail_heading"))),
        Line::default(),
        field("Category", record.category.clone(), "card_category"),
        field("Price", record.price_label(), "card_price"),
        field("Weight", record.weight.to_string(), "detail_body"),
        field(
            "Rating",
            format!("★ {:.1} ({} reviews)", record.rating, record.reviews),
            "card_rating",
        ),
        field("Tag", record.tag.clone(), "card_tag"),
        field(
            "Image",
            record.image.clone().unwrap_or_else(|| "none".to_string()),
            "card_muted",
        ),
        Line::default(),
    ];
    lines.extend(
        record
            .description
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), app.style("detail_body")))),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
