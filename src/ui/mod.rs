// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (header, table, detail, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - header: Top bar with connection state and key counts
// - key_table: The paged key list
// - detail: Detail panel of the focused key (countdown, value preview)
// - legend: Renders hotkey legend
// - status_bar: Bottom bar with filter, sort and page
// - dialogs: Prompts, delete confirmation, help
// - toast: Renders toast notifications (brief pop-up messages)

pub mod detail;
pub mod dialogs;
pub mod header;
pub mod key_table;
pub mod layout;
pub mod legend;
pub mod render;
pub mod status_bar;
pub mod toast;

pub use render::render;
