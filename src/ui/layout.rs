use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the detail panel is hidden
const MIN_WIDTH_FOR_DETAIL: u16 = 90;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top bar with connection state
    pub header_area: Rect,
    /// Key table
    pub table_area: Rect,
    /// Detail panel of the focused key (if shown)
    pub detail_area: Option<Rect>,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, show_detail: bool, vim_mode: bool) -> LayoutInfo {
    let legend_height = super::legend::calculate_legend_height(terminal_size.width, vim_mode);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header bar
            Constraint::Min(5),                // Key table (+ detail)
            Constraint::Length(legend_height), // Legend area (exact fit for wrapped content)
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    let content_area = main_chunks[1];
    let (table_area, detail_area) = if show_detail && content_area.width >= MIN_WIDTH_FOR_DETAIL {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_area);
        (chunks[0], Some(chunks[1]))
    } else {
        (content_area, None)
    };

    LayoutInfo {
        header_area: main_chunks[0],
        table_area,
        detail_area,
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_shown_on_wide_terminal() {
        let info = calculate_layout(Rect::new(0, 0, 160, 40), true, false);
        assert!(info.detail_area.is_some());
        assert!(info.table_area.width > info.detail_area.map(|a| a.width).unwrap_or(0));
    }

    #[test]
    fn test_detail_hidden_on_narrow_terminal() {
        let info = calculate_layout(Rect::new(0, 0, 60, 40), true, false);
        assert!(info.detail_area.is_none());
        assert_eq!(info.table_area.width, 60);
    }

    #[test]
    fn test_detail_hidden_when_toggled_off() {
        let info = calculate_layout(Rect::new(0, 0, 160, 40), false, false);
        assert!(info.detail_area.is_none());
    }
}
