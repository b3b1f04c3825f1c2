use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keytui::model::{FilterSpec, PageSize, SortSpec};

/// Build the status line (extracted for testability)
pub fn build_status_line(filter: &FilterSpec, sort: SortSpec, page_size: PageSize) -> String {
    let pattern = if filter.pattern.is_empty() {
        "*".to_string()
    } else {
        filter.pattern.clone()
    };
    let types = if filter.types.is_empty() {
        "any".to_string()
    } else {
        filter
            .types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    };

    [
        format!("Pattern: {}", pattern),
        format!("Type: {}", types),
        format!("TTL: {}", filter.ttl_class.as_str()),
        format!("Sort: {}{}", sort.field.as_str(), sort.order.as_str()),
        format!("Page size: {}", page_size.get()),
    ]
    .join(" | ")
}

/// Render the bottom status bar, coloring the labels (before colons)
pub fn render_status_bar(f: &mut Frame, area: Rect, filter: &FilterSpec, sort: SortSpec, page_size: PageSize) {
    let status_line = build_status_line(filter, sort, page_size);

    let mut spans = vec![];
    for (idx, part) in status_line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        if let Some(colon_pos) = part.find(':') {
            let label = &part[..=colon_pos];
            let value = &part[colon_pos + 1..];
            spans.push(Span::styled(label.to_string(), Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(value.to_string()));
        } else {
            spans.push(Span::raw(part.to_string()));
        }
    }

    let title = if filter.is_active() { "Status (filtered)" } else { "Status" };
    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}
