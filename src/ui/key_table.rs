use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use keytui::api::{KeyRecord, KeyType};
use keytui::logic::formatting::{self, TtlUrgency};
use keytui::model::{countdown, PageView};

pub fn type_color(key_type: KeyType) -> Color {
    match key_type {
        KeyType::String => Color::Green,
        KeyType::Hash => Color::Magenta,
        KeyType::List => Color::Blue,
        KeyType::Set => Color::Cyan,
        KeyType::ZSet => Color::LightYellow,
        KeyType::Stream => Color::LightRed,
        KeyType::Unknown => Color::DarkGray,
    }
}

pub fn urgency_color(urgency: TtlUrgency) -> Color {
    match urgency {
        TtlUrgency::Normal => Color::Gray,
        TtlUrgency::Warning => Color::Yellow,
        TtlUrgency::Critical => Color::Red,
    }
}

fn ttl_cell(key: &KeyRecord, now_ms: i64) -> Cell<'static> {
    let ttl = countdown::ttl_now(key.ttl_seconds, key.fetched_at_ms, now_ms);
    let style = if ttl == keytui::api::TTL_PERSISTENT {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(urgency_color(formatting::ttl_urgency(ttl)))
    };
    Cell::from(formatting::format_ttl(ttl)).style(style)
}

fn key_row(key: &KeyRecord, name_width: usize, now_ms: i64) -> Row<'static> {
    let mark = if key.selected { "◉" } else { " " };
    Row::new(vec![
        Cell::from(Span::styled(mark, Style::default().fg(Color::Cyan))),
        Cell::from(formatting::truncate_to_width(&key.name, name_width)),
        Cell::from(Span::styled(
            key.key_type.badge(),
            Style::default().fg(type_color(key.key_type)).add_modifier(Modifier::BOLD),
        )),
        ttl_cell(key, now_ms),
        Cell::from(formatting::format_bytes(key.size_bytes)),
    ])
}

/// Render the visible page of keys
pub fn render_key_table(
    f: &mut Frame,
    area: Rect,
    page: &PageView,
    cursor: Option<usize>,
    sort_label: &str,
    now_ms: i64,
) {
    let title = format!(
        " Keys {}/{} · {} ",
        if page.total_pages == 0 { 0 } else { page.page_index + 1 },
        page.total_pages,
        sort_label
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if page.items.is_empty() {
        let message = if page.total_count == 0 {
            "No keys"
        } else {
            "No keys match the filter"
        };
        let empty = ratatui::widgets::Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // mark + type + ttl + size columns, spacing and borders
    let fixed = 2 + 5 + 10 + 11 + 4 + 2;
    let name_width = (area.width as usize).saturating_sub(fixed).max(8);

    let header = Row::new(vec!["", "Name", "Type", "TTL", "Size"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|key| key_row(key, name_width, now_ms))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("► ");

    let mut state = TableState::default();
    state.select(cursor);
    f.render_stateful_widget(table, area, &mut state);
}
