use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmClearCompleted => handle_confirm_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Ctrl+C always quits
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        // Navigation
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Checkbox
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected_done();
            Ok(false)
        }

        // Daily list
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('m') => {
            app.move_unfinished_to_stock();
            Ok(false)
        }
        KeyCode::Char('C') => {
            app.clear_daily();
            Ok(false)
        }

        // Stock list
        KeyCode::Char('r') => {
            app.return_selected_to_daily();
            Ok(false)
        }
        KeyCode::Char('x') => {
            app.request_clear_completed();
            Ok(false)
        }

        // Work timer
        KeyCode::Char('s') => {
            app.start_timer();
            Ok(false)
        }
        KeyCode::Char('p') => {
            app.stop_timer();
            Ok(false)
        }
        KeyCode::Char('0') => {
            app.reset_timer();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_backspace();
            Ok(false)
        }
        // Without Ctrl so Ctrl+C doesn't type a 'c'
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in the clear-completed confirmation
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_clear_completed(true);
            Ok(false)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm_clear_completed(false);
            Ok(false)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Focus, ManualClock};
    use crate::persistence::{AppConfig, MemoryStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> (AppState, ManualClock) {
        let clock = ManualClock::at(2024, 1, 1, 9, 0, 0);
        let app = AppState::new(
            Box::new(MemoryStore::new()),
            Box::new(clock.clone()),
            AppConfig::default(),
        );
        (app, clock)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_task(app: &mut AppState, clock: &ManualClock, label: &str) {
        handle_key(app, key(KeyCode::Char('a'))).unwrap();
        for c in label.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(app, key(KeyCode::Enter)).unwrap();
        clock.advance_millis(1);
    }

    #[test]
    fn test_handle_quit() {
        let (mut app, _) = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(handle_key(&mut app, key(KeyCode::Esc)).unwrap());
        assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let (mut app, clock) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        // 'q' is text while the form is open
        for c in "qux".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        let quit = handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        clock.advance_millis(1);

        assert!(!quit);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.daily.tasks().len(), 1);
        assert_eq!(app.daily.tasks()[0].label, "qu");
    }

    #[test]
    fn test_escape_cancels_form() {
        let (mut app, _) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('z'))).unwrap();
        let quit = handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert!(!quit);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.daily.tasks().is_empty());
    }

    #[test]
    fn test_handle_navigation() {
        let (mut app, clock) = create_test_app();
        type_task(&mut app, &clock, "one");
        type_task(&mut app, &clock, "two");

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.daily_selected, 1);
        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.daily_selected, 0);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Stock);
    }

    #[test]
    fn test_move_and_return_keys() {
        let (mut app, clock) = create_test_app();
        type_task(&mut app, &clock, "carry");

        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        assert!(app.daily.tasks().is_empty());
        assert_eq!(app.stock.tasks().len(), 1);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.daily.tasks().len(), 1);
        assert!(app.stock.tasks().is_empty());
    }

    #[test]
    fn test_clear_completed_confirmation() {
        let (mut app, clock) = create_test_app();
        type_task(&mut app, &clock, "carry");
        handle_key(&mut app, key(KeyCode::Char('m'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmClearCompleted);
        // Quit keys are ignored while confirming
        assert!(!handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.stock.tasks().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.stock.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_timer_keys() {
        let (mut app, clock) = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(app.timer.is_running());
        clock.advance_secs(42);
        handle_key(&mut app, key(KeyCode::Char('p'))).unwrap();
        assert!(!app.timer.is_running());
        assert_eq!(app.timer_display(), "0h 0m 42s");
        handle_key(&mut app, key(KeyCode::Char('0'))).unwrap();
        assert_eq!(app.timer_display(), "0h 0m 0s");
    }
}
