use crate::app::AppState;
use crate::ui::layout::fits;
use crate::ui::styles::{border_style, idle_style, running_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the work timer
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if !fits(area) {
        return;
    }

    let (badge, style) = if app.timer.is_running() {
        ("● running", running_style())
    } else {
        ("■ stopped", idle_style())
    };

    let lines = vec![
        Line::from(Span::styled(format!("⏱ {}", app.timer_display()), style)),
        Line::from(Span::styled(badge, style)),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Work Timer ", title_style())),
    );

    f.render_widget(paragraph, area);
}
