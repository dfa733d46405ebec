use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Smallest area a bordered pane can draw anything into
const MIN_PANE_WIDTH: u16 = 4;
const MIN_PANE_HEIGHT: u16 = 3;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub daily_area: Rect,
    pub stock_area: Rect,
    pub timer_area: Rect,
    pub log_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row), then clock/status header (1 row)
/// - Upper area: Daily (50%) | Stock (50%)
/// - Lower area: Timer (30%) | Completion log (70%)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(1), // Header
            Constraint::Percentage(60),
            Constraint::Min(0),
        ])
        .split(area);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[2]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[3]);

    MainLayout {
        keybindings_area: main_chunks[0],
        header_area: main_chunks[1],
        daily_area: lists[0],
        stock_area: lists[1],
        timer_area: bottom[0],
        log_area: bottom[1],
    }
}

/// Whether a bordered pane fits in `area`; panes that don't are skipped
pub fn fits(area: Rect) -> bool {
    area.width >= MIN_PANE_WIDTH && area.height >= MIN_PANE_HEIGHT
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.header_area.height, 1);
        assert!(fits(layout.daily_area));
        assert!(fits(layout.stock_area));
        assert!(fits(layout.timer_area));
        assert!(fits(layout.log_area));
        assert_eq!(layout.daily_area.width + layout.stock_area.width, 100);
    }

    #[test]
    fn test_tiny_terminal_skips_panes() {
        let layout = create_layout(Rect::new(0, 0, 6, 4));
        assert!(!fits(layout.timer_area));
        assert!(!fits(layout.log_area));
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 9);
    }
}
