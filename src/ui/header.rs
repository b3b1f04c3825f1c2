use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use keytui::model::{ConnectionState, PageView};

/// Render the top bar: connection state, API address and key counts
pub fn render_header(
    f: &mut Frame,
    area: Rect,
    connection: &ConnectionState,
    base_url: &str,
    page: &PageView,
    loading: bool,
) {
    let (dot, status_text, color) = match connection {
        ConnectionState::Connected => ("●", "Connected".to_string(), Color::Green),
        ConnectionState::Connecting => ("◌", "Connecting...".to_string(), Color::Yellow),
        ConnectionState::Disconnected { message, .. } => {
            ("●", format!("Disconnected: {}", message), Color::Red)
        }
    };

    let mut spans = vec![
        Span::styled(format!("{} ", dot), Style::default().fg(color)),
        Span::styled(status_text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::raw(base_url.to_string()),
        Span::raw(" │ "),
        Span::styled("Keys: ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{}/{}", page.filtered_count, page.total_count)),
    ];

    if page.selected_count > 0 {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Selected: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(page.selected_count.to_string()));
    }

    if loading {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Loading...", Style::default().fg(Color::Cyan)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("keytui"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(header, area);
}
