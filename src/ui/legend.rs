use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn hotkey(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ]
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool) -> Vec<Span<'static>> {
    let mut spans = vec![];

    // Navigation keys (different for vim mode)
    if vim_mode {
        spans.extend(hotkey("jk", ":Nav  "));
        spans.extend(hotkey("h/l", ":Page  "));
        spans.extend(hotkey("gg/G", ":First/Last  "));
        spans.extend(hotkey("^d/^u", ":½Page  "));
    } else {
        spans.extend(hotkey("↑/↓", ":Nav  "));
        spans.extend(hotkey("←/→", ":Page  "));
    }

    spans.extend(hotkey("/", ":Filter  "));
    spans.extend(hotkey("t", ":Type  "));
    spans.extend(hotkey("e", ":TTL class  "));
    spans.extend(hotkey("c", ":Clear  "));
    spans.extend(hotkey("s", ":Sort  "));
    spans.extend(hotkey("S", ":Reverse  "));
    spans.extend(hotkey("p", ":Page size  "));
    spans.extend(hotkey("Space", ":Select  "));
    spans.extend(hotkey("a", ":Select page  "));
    spans.extend(hotkey("d", ":Delete  "));
    spans.extend(hotkey("r", ":Rename  "));
    spans.extend(hotkey("T", ":Set TTL  "));
    spans.extend(hotkey("x", ":Persist  "));
    spans.extend(hotkey("R", ":Reload  "));
    spans.extend(hotkey("i", ":Detail  "));
    spans.extend(hotkey("?", ":Help  "));
    spans.extend(hotkey("q", ":Quit"));

    spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
fn build_legend_paragraph(vim_mode: bool) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(vim_mode))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool) {
    f.render_widget(build_legend_paragraph(vim_mode), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, vim_mode: bool) -> u16 {
    // Count lines without the block; line_count() mis-handles borders
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(vim_mode))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_legend_vim_mode_navigation() {
        let text = spans_to_text(&build_hotkey_spans(true));
        assert!(text.contains("gg/G:First/Last"));
        assert!(!text.contains("↑/↓"));
    }

    #[test]
    fn test_legend_default_navigation() {
        let text = spans_to_text(&build_hotkey_spans(false));
        assert!(text.contains("↑/↓:Nav"));
        assert!(!text.contains("gg/G"));
    }

    #[test]
    fn test_legend_lists_key_operations() {
        let text = spans_to_text(&build_hotkey_spans(false));
        for action in ["d:Delete", "r:Rename", "T:Set TTL", "x:Persist", "q:Quit"] {
            assert!(text.contains(action), "legend should contain {}, got: {}", action, text);
        }
    }

    #[test]
    fn test_legend_wraps_on_narrow_terminal() {
        assert!(calculate_legend_height(40, false) > calculate_legend_height(400, false));
        assert_eq!(calculate_legend_height(400, false), 3);
    }
}
