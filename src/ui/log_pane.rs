use crate::app::AppState;
use crate::domain::LogEntry;
use crate::ui::layout::fits;
use crate::ui::styles::{border_style, default_style, done_style, muted_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a line for a completed task
fn create_log_line(entry: &LogEntry) -> Line<'static> {
    let mut spans = vec![
        Span::styled("✓ ".to_string(), done_style()),
        Span::styled(entry.label.clone(), default_style()),
    ];
    if let Some(duration) = entry.duration_text() {
        spans.push(Span::styled(format!("  ({})", duration), muted_style()));
    }
    Line::from(spans)
}

/// Render today's completion log
pub fn render_log_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if !fits(area) {
        return;
    }
    let summary = app.log.summary();

    let items: Vec<ListItem> = if summary.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            app.config.log_empty_text.clone(),
            muted_style(),
        )))]
    } else {
        summary
            .entries
            .iter()
            .map(|entry| ListItem::new(create_log_line(entry)))
            .collect()
    };

    let title = format!(
        " Done {} ({}) · total {} ",
        app.log.day(),
        summary.entries.len(),
        summary.total_text()
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
