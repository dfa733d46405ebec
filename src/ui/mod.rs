pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod log_pane;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use keybindings::{render_header, render_keybindings};
use layout::create_layout;
use list_pane::{render_daily_pane, render_stock_pane};
use log_pane::render_log_pane;
use modal::{render_confirm_clear_modal, render_input_form};
use ratatui::Frame;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);
    render_header(f, app, layout.header_area);

    render_daily_pane(f, app, layout.daily_area);
    render_stock_pane(f, app, layout.stock_area);
    render_timer_pane(f, app, layout.timer_area);
    render_log_pane(f, app, layout.log_area);

    render_input_form(f, app, size);
    render_confirm_clear_modal(f, app, size);
}
