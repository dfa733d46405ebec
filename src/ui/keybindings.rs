use crate::app::AppState;
use crate::domain::{Clock, UiMode};
use crate::ui::styles::{error_style, hint_style, muted_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::AddingTask => Line::from(" Enter add   Esc cancel"),
        UiMode::ConfirmClearCompleted => Line::from(" y confirm   n/Esc cancel"),
        UiMode::Normal => Line::from(vec![
            Span::raw(" Tab switch list   "),
            Span::raw("↑/↓ select   "),
            Span::raw("Space done   "),
            Span::raw("a add   "),
            if app.daily.has_unfinished() {
                Span::raw("m move to stock   ")
            } else {
                Span::styled("m move to stock   ", muted_style())
            },
            Span::raw("C clear daily   "),
            Span::raw("r return   "),
            Span::raw("x clear done   "),
            Span::raw("s/p/0 timer   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the clock header, with the last error when there is one
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let now = app.clock.now().format("%a %b %d  %H:%M");
    let mut spans = vec![Span::styled(format!(" 🕒 {} ", now), title_style())];
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("  {}", status), error_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
