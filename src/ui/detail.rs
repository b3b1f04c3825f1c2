//! Detail panel of the focused key
//!
//! Shows the locally ticking TTL countdown next to the metadata and a
//! value preview fetched from the API.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use keytui::api::{KeyInfo, KeyRecord, TTL_PERSISTENT};
use keytui::logic::formatting;

use super::key_table::{type_color, urgency_color};

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{:<8}", text), Style::default().fg(Color::Yellow))
}

fn countdown_span(remaining: Option<i64>, ttl_fallback: i64) -> Span<'static> {
    match remaining {
        Some(secs) => Span::styled(
            formatting::format_countdown(secs),
            Style::default()
                .fg(urgency_color(formatting::ttl_urgency(secs)))
                .add_modifier(Modifier::BOLD),
        ),
        None if ttl_fallback == TTL_PERSISTENT => Span::styled("∞ (no expiry)", Style::default().fg(Color::DarkGray)),
        None => Span::raw(formatting::format_ttl(ttl_fallback)),
    }
}

/// Render the detail panel
///
/// `remaining` is the countdown for this key, if one is running.
pub fn render_detail(
    f: &mut Frame,
    area: Rect,
    key: Option<&KeyRecord>,
    info: Option<&KeyInfo>,
    remaining: Option<i64>,
) {
    let block = Block::default().borders(Borders::ALL).title(" Detail ");

    let Some(key) = key else {
        let empty = Paragraph::new(Span::styled("No key focused", Style::default().fg(Color::DarkGray)))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    // Prefer the freshly fetched metadata over the list snapshot
    let (key_type, ttl, size) = match info {
        Some(info) => (info.key_type, info.ttl, info.size),
        None => (key.key_type, key.ttl_seconds, key.size_bytes),
    };

    let mut lines = vec![
        Line::from(vec![label("Name"), Span::styled(key.name.clone(), Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(vec![
            label("Type"),
            Span::styled(key_type.as_str(), Style::default().fg(type_color(key_type))),
        ]),
        Line::from(vec![label("TTL"), countdown_span(remaining, ttl)]),
        Line::from(vec![label("Size"), Span::raw(formatting::format_bytes(size))]),
        Line::from(""),
    ];

    let preview_width = (area.width as usize).saturating_sub(2) * 6;
    match info.and_then(|i| i.value.as_ref()) {
        Some(value) => {
            lines.push(Line::from(label("Value")));
            lines.push(Line::from(formatting::preview_value(value, preview_width)));
        }
        None if info.is_some() => {
            lines.push(Line::from(Span::styled("(no value)", Style::default().fg(Color::DarkGray))));
        }
        None => {
            lines.push(Line::from(Span::styled("Loading...", Style::default().fg(Color::DarkGray))));
        }
    }

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
