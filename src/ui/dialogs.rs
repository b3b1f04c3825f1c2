use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use keytui::model::{InputKind, InputState};

/// Keys listed by name in the delete confirmation before summarizing
const MAX_LISTED_KEYS: usize = 5;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Lines of the delete confirmation (extracted for testability)
fn delete_confirmation_lines(keys: &[String]) -> Vec<String> {
    let mut lines = vec![
        if keys.len() == 1 {
            "Delete this key?".to_string()
        } else {
            format!("Delete {} keys?", keys.len())
        },
        String::new(),
    ];
    lines.extend(keys.iter().take(MAX_LISTED_KEYS).map(|k| format!("  {}", k)));
    if keys.len() > MAX_LISTED_KEYS {
        lines.push(format!("  ... and {} more", keys.len() - MAX_LISTED_KEYS));
    }
    lines.push(String::new());
    lines.push("WARNING: This action cannot be undone!".to_string());
    lines.push(String::new());
    lines.push("Continue? (y/n)".to_string());
    lines
}

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, keys: &[String]) {
    let lines = delete_confirmation_lines(keys);
    let prompt_area = centered(f.area(), 60, lines.len() as u16 + 2);

    let prompt = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render a line-input prompt (filter, rename, set TTL)
pub fn render_input_prompt(f: &mut Frame, input: &InputState) {
    let prompt_area = centered(f.area(), 60, 5);

    let hint = match input.kind {
        InputKind::Filter => "Enter: apply  Esc: clear",
        InputKind::Rename { .. } => "Enter: rename  Esc: cancel",
        InputKind::SetTtl { .. } => "Enter: set  Esc: cancel",
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(input.buffer.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(input.kind.title())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the help overlay listing every binding
pub fn render_help(f: &mut Frame, vim_mode: bool) {
    let mut bindings: Vec<(&str, &str)> = vec![
        ("↑/↓", "Move cursor"),
        ("←/→", "Previous / next page"),
        ("PgUp/PgDn", "Previous / next page"),
        ("Home/End", "First / last row"),
    ];
    if vim_mode {
        bindings.extend([
            ("j/k", "Move cursor"),
            ("h/l", "Previous / next page"),
            ("gg/G", "First / last row"),
            ("^d/^u", "Half page down / up"),
            ("^f/^b", "Next / previous page"),
        ]);
    }
    bindings.extend([
        ("/", "Filter by glob pattern"),
        ("t", "Cycle type filter"),
        ("e", "Cycle TTL class"),
        ("c", "Clear filters"),
        ("Esc", "Clear selection, then filters"),
        ("s / S", "Sort field / reverse order"),
        ("p", "Cycle page size"),
        ("Space / a", "Select key / select page"),
        ("d", "Delete selected or focused"),
        ("r", "Rename focused key"),
        ("T / x", "Set TTL / persist focused key"),
        ("R / F5", "Reload keys"),
        ("i / Enter", "Toggle detail panel"),
        ("q / ^c", "Quit"),
    ]);

    let lines: Vec<Line> = bindings
        .into_iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<11}", key), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::raw(action),
            ])
        })
        .collect();

    let help_area = centered(f.area(), 50, lines.len() as u16 + 2);
    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help (any key to close)"),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, help_area);
    f.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_confirmation_single_key() {
        let lines = delete_confirmation_lines(&["user:1".to_string()]);
        assert_eq!(lines[0], "Delete this key?");
        assert!(lines.contains(&"  user:1".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Continue? (y/n)"));
    }

    #[test]
    fn test_delete_confirmation_summarizes_long_selection() {
        let keys: Vec<String> = (0..8).map(|i| format!("k{}", i)).collect();
        let lines = delete_confirmation_lines(&keys);
        assert_eq!(lines[0], "Delete 8 keys?");
        assert!(lines.contains(&"  k4".to_string()));
        assert!(!lines.contains(&"  k5".to_string()));
        assert!(lines.contains(&"  ... and 3 more".to_string()));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 30, 4);
        let r = centered(area, 60, 10);
        assert_eq!(r, Rect::new(0, 0, 30, 4));
    }
}
