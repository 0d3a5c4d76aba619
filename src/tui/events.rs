use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::tui::app::{App, Mode, Tab};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils;

/// How long to wait for input before a redraw tick; keeps status-message
/// timeouts honest without busy polling
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Guard that ensures terminal state is restored even on panic
/// This is critical for TUI applications - if the terminal is left in raw
/// mode or alternate screen, the user's terminal will be unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    /// Initialize terminal state and return a guard
    /// The guard will restore terminal state when dropped (even on panic)
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state (called on normal exit)
    /// After calling this, the guard will do nothing on drop
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Restore terminal state even if we panic
        // Ignore errors in drop - we're already in a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Check whether a key event matches a configured binding string
fn binding_matches(binding: &str, key: &KeyEvent) -> bool {
    utils::parse_key_binding(binding)
        .map(|parsed| parsed.matches(key))
        .unwrap_or(false)
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    // Setup terminal with guard to ensure restoration on panic
    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        // Check if status message should be auto-cleared
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.ui.mode {
            Mode::Help => {
                // Any key closes the help overlay
                app.ui.mode = Mode::View;
            }
            Mode::Input => handle_input_mode(&mut app, &key),
            Mode::ConfirmDelete => handle_confirm_mode(&mut app, &key),
            Mode::History => handle_history_mode(&mut app, &key),
            Mode::View => {
                if binding_matches(&app.config.key_bindings.quit, &key) {
                    break;
                }
                handle_view_mode(&mut app, &key);
            }
        }
    }

    guard.restore()?;
    Ok(())
}

fn handle_input_mode(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            if let Some(input) = app.input.as_mut() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.input.as_mut() {
                input.left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.input.as_mut() {
                input.right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.input.as_mut() {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.input.as_mut() {
                input.end();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.input.as_mut() {
                input.insert(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_delete(),
        KeyCode::Enter => app.confirm_delete_choice(),
        KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
            app.modal.selection = 1 - app.modal.selection;
        }
        _ => {}
    }
}

fn handle_history_mode(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.close_history(),
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(history) = app.history.as_mut() {
                history.scroll = history.scroll.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(history) = app.history.as_mut() {
                history.scroll = history.scroll.saturating_add(1);
            }
        }
        KeyCode::PageUp => {
            if let Some(history) = app.history.as_mut() {
                history.scroll = history.scroll.saturating_sub(10);
            }
        }
        KeyCode::PageDown => {
            if let Some(history) = app.history.as_mut() {
                history.scroll = history.scroll.saturating_add(10);
            }
        }
        _ => {}
    }
}

fn handle_view_mode(app: &mut App, key: &KeyEvent) {
    let bindings = app.config.key_bindings.clone();

    if binding_matches(&bindings.help, key) {
        app.ui.mode = Mode::Help;
    } else if binding_matches(&bindings.refresh, key) {
        app.refresh_current_tab();
    } else if binding_matches(&bindings.tab_left, key) {
        app.switch_tab(app.ui.current_tab.left());
    } else if binding_matches(&bindings.tab_right, key) {
        app.switch_tab(app.ui.current_tab.right());
    } else if binding_matches(&bindings.tab_1, key) {
        app.switch_tab(Tab::Daily);
    } else if binding_matches(&bindings.tab_2, key) {
        app.switch_tab(Tab::Projects);
    } else if binding_matches(&bindings.tab_3, key) {
        app.switch_tab(Tab::Ideas);
    } else if binding_matches(&bindings.tab_4, key) {
        app.switch_tab(Tab::Summary);
    } else if binding_matches(&bindings.list_up, key) {
        app.move_selection(false);
    } else if binding_matches(&bindings.list_down, key) {
        app.move_selection(true);
    } else if binding_matches(&bindings.toggle_done, key) {
        app.toggle_current_done();
    } else if binding_matches(&bindings.increment, key) {
        app.adjust_current(1);
    } else if binding_matches(&bindings.decrement, key) {
        app.adjust_current(-1);
    } else if binding_matches(&bindings.edit_note, key) {
        if app.ui.current_tab == Tab::Daily {
            app.edit_current_note();
        }
    } else if binding_matches(&bindings.new, key) {
        app.open_create_input();
    } else if binding_matches(&bindings.add_entry, key) {
        app.open_entry_input();
    } else if binding_matches(&bindings.set_status, key) {
        app.cycle_selected_status();
    } else if binding_matches(&bindings.archive, key) {
        app.archive_selected();
    } else if binding_matches(&bindings.delete, key) {
        app.request_delete_selected();
    } else if binding_matches(&bindings.select, key) {
        app.open_history();
    }
}
