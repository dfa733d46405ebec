use crate::app::AppState;
use crate::domain::{checkbox, Focus, Task};
use crate::ui::layout::fits;
use crate::ui::styles::{
    border_style, default_style, done_style, focused_border_style, muted_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Create a single row: checkbox, label, and an optional trailing action hint
fn create_task_line(task: &Task, action: Option<&'static str>) -> Line<'static> {
    let label_style = if task.done { done_style() } else { default_style() };
    let mut spans = vec![
        Span::raw(format!("{} ", checkbox(task.done))),
        Span::styled(task.label.clone(), label_style),
    ];
    if let Some(action) = action {
        spans.push(Span::styled(format!("  {}", action), muted_style()));
    }
    Line::from(spans)
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        focused_border_style()
    } else {
        border_style()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style()))
}

fn render_rows(
    f: &mut Frame,
    area: Rect,
    items: Vec<ListItem<'static>>,
    block: Block<'static>,
    selected: Option<usize>,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());
    let mut state = ListState::default();
    state.select(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Render today's list
pub fn render_daily_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if !fits(area) {
        return;
    }
    let focused = app.focus == Focus::Daily;
    let tasks = app.daily.tasks();

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| ListItem::new(create_task_line(task, None)))
        .collect();

    let remaining = tasks.iter().filter(|t| !t.done).count();
    let title = format!(
        " {} ({} open / {}) ",
        app.config.daily_title,
        remaining,
        tasks.len()
    );
    let selected = (focused && !tasks.is_empty()).then_some(app.daily_selected);

    render_rows(f, area, items, pane_block(title, focused), selected);
}

/// Render the stock list, or its placeholder row when empty
pub fn render_stock_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if !fits(area) {
        return;
    }
    let focused = app.focus == Focus::Stock;
    let tasks = app.stock.tasks();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            app.config.stock_empty_text.clone(),
            muted_style(),
        )))]
    } else {
        tasks
            .iter()
            .map(|task| {
                let action = if task.done { None } else { Some("↩ r") };
                ListItem::new(create_task_line(task, action))
            })
            .collect()
    };

    let clear_hint = if app.stock.has_completed() {
        "x clear done"
    } else {
        "nothing to clear"
    };
    let title = format!(" Stock ({}) · {} ", tasks.len(), clear_hint);
    let selected = (focused && !tasks.is_empty()).then_some(app.stock_selected);

    render_rows(f, area, items, pane_block(title, focused), selected);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_line() {
        let task = Task::new("t-1".to_string(), "Test task");
        let line = create_task_line(&task, None);
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("[ ]"));
        assert!(line_str.contains("Test task"));
    }

    #[test]
    fn test_create_done_line_with_action() {
        let mut task = Task::new("s-1".to_string(), "Backlog");
        task.done = true;
        let line = create_task_line(&task, Some("↩ r"));
        let line_str = format!("{:?}", line);
        assert!(line_str.contains("[x]"));
        assert!(line_str.contains("↩ r"));
    }
}
