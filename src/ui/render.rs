use crate::App;
use ratatui::Frame;

use keytui::api;

use super::{detail, dialogs, header, key_table, layout, legend, status_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let now = api::now_ms();
    let model = &app.model;

    let layout_info = layout::calculate_layout(size, model.ui.show_detail, model.ui.vim_mode);

    let page = model.keys.current_page();
    header::render_header(
        f,
        layout_info.header_area,
        &model.connection.state,
        &model.connection.base_url,
        &page,
        app.is_loading(),
    );

    let sort = model.keys.sort();
    let sort_label = format!("{}{}", sort.field.as_str(), sort.order.as_str());
    key_table::render_key_table(f, layout_info.table_area, &page, model.ui.cursor, &sort_label, now);

    if let Some(detail_area) = layout_info.detail_area {
        let focused = model.focused_key();
        // The detail only counts if it still belongs to the focused key
        let info = model
            .ui
            .detail
            .as_ref()
            .filter(|info| focused.map(|k| k.name == info.name).unwrap_or(false));
        let remaining = model
            .ui
            .countdown
            .as_ref()
            .filter(|(key, _)| focused.map(|k| &k.name == key).unwrap_or(false))
            .map(|(_, secs)| *secs);
        detail::render_detail(f, detail_area, focused, info, remaining);
    }

    legend::render_legend(f, layout_info.legend_area, model.ui.vim_mode);
    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        model.keys.filter(),
        sort,
        model.keys.page_size(),
    );

    // Modals draw on top, at most one at a time
    if let Some(input) = &model.ui.input {
        dialogs::render_input_prompt(f, input);
    } else if let Some(keys) = &model.ui.confirm_delete {
        dialogs::render_delete_confirmation(f, keys);
    } else if model.ui.show_help {
        dialogs::render_help(f, model.ui.vim_mode);
    }

    if let Some((message, _)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
