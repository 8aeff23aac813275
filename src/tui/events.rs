use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::tui::App;
use crate::tui::app::{Mode, NoteField, Screen};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::{ParsedKeyBinding, parse_key_binding};

/// Restores the terminal on drop, including during a panic unwind.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore explicitly on normal exit; drop becomes a no-op
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
        // Already cleaning up; errors have nowhere to go
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Checked before the alternate screen so the message stays visible
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.poll_login();
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect, sidebar_percent(app.screen));
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        // Only Press events; Windows also reports Release
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event)? {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    Ok(())
}

/// Screens without a list give the whole content row to the main area
pub fn sidebar_percent(screen: Screen) -> u16 {
    match screen {
        Screen::Subjects | Screen::Tasks | Screen::Notes => 45,
        Screen::Home | Screen::Login | Screen::Dashboard => 0,
    }
}

/// Returns true when the app should quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    // Ctrl+c always quits, even while typing
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.mode {
        Mode::Help => handle_help_mode(app, key_event),
        Mode::Search => handle_search_mode(app, key_event),
        Mode::Confirm => handle_confirm_mode(app, key_event),
        Mode::Details => handle_details_mode(app, key_event),
        Mode::EditNote => handle_note_form_mode(app, key_event),
        Mode::View => match app.screen {
            Screen::Home => handle_home_screen(app, key_event),
            Screen::Login => handle_login_screen(app, key_event),
            _ => handle_global_key_bindings(app, key_event),
        },
    }
}

fn binding(key_str: &str) -> Result<ParsedKeyBinding, TuiError> {
    parse_key_binding(key_str).map_err(TuiError::KeyBindingError)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    let has_primary_mod = crate::utils::has_primary_modifier(key_event.modifiers);
    binding.requires_ctrl == has_primary_mod && binding.key_code == key_event.code
}

fn pressed(key_event: KeyEvent, key_str: &str) -> Result<bool, TuiError> {
    Ok(matches_key_event(key_event, &binding(key_str)?))
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || pressed(key_event, &app.config.key_bindings.help)? {
        app.exit_help_mode();
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Enter => app.exit_search_mode(),
        KeyCode::Char(c) => app.add_to_search(c),
        KeyCode::Backspace => app.remove_from_search(),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            app.confirm_selection = 1 - app.confirm_selection.min(1);
        }
        KeyCode::Enter => {
            let accepted = app.confirm_selection == 0;
            app.resolve_confirm(accepted);
        }
        KeyCode::Char('y') | KeyCode::Char('s') => app.resolve_confirm(true),
        KeyCode::Esc | KeyCode::Char('n') => app.resolve_confirm(false),
        _ => {}
    }
    Ok(false)
}

fn handle_details_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if matches!(key_event.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        app.close_popup();
    }
    Ok(false)
}

fn handle_home_screen(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if pressed(key_event, &app.config.key_bindings.quit)? {
        return Ok(true);
    }
    if pressed(key_event, &app.config.key_bindings.help)? {
        app.enter_help_mode();
        return Ok(false);
    }
    if matches!(key_event.code, KeyCode::Enter | KeyCode::Char('l')) {
        app.go_to(Screen::Login);
    }
    Ok(false)
}

fn handle_login_screen(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match key_event.code {
        KeyCode::Esc => app.go_to(Screen::Home),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_form.next_field()
        }
        KeyCode::Enter => {
            if app.login_form.current_field == crate::tui::app::LoginField::Email {
                app.login_form.next_field();
            } else {
                app.submit_login();
            }
        }
        KeyCode::Char(c) => app.login_form.current_editor().insert_char(c),
        KeyCode::Backspace => app.login_form.current_editor().delete_char(),
        KeyCode::Left => app.login_form.current_editor().move_left(),
        KeyCode::Right => app.login_form.current_editor().move_right(),
        KeyCode::Home => app.login_form.current_editor().move_home(),
        KeyCode::End => app.login_form.current_editor().move_end(),
        _ => {}
    }
    Ok(false)
}

fn handle_note_form_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let save_requested = key_event.code == KeyCode::Char('s')
        && crate::utils::has_primary_modifier(key_event.modifiers);
    if save_requested {
        app.save_note_form();
        return Ok(false);
    }

    let Some(form) = app.note_form.as_mut() else {
        app.mode = Mode::View;
        return Ok(false);
    };

    match key_event.code {
        KeyCode::Esc => app.cancel_edit_note(),
        KeyCode::Tab => form.navigate(true),
        KeyCode::BackTab => form.navigate(false),
        KeyCode::Enter => {
            if form.current_field == NoteField::Content {
                form.content.insert_newline();
            } else {
                app.save_note_form();
            }
        }
        KeyCode::Char(c) => form.current_editor().insert_char(c),
        KeyCode::Backspace => form.current_editor().delete_char(),
        KeyCode::Left => form.current_editor().move_left(),
        KeyCode::Right => form.current_editor().move_right(),
        KeyCode::Up => form.current_editor().move_up(),
        KeyCode::Down => form.current_editor().move_down(),
        KeyCode::Home => form.current_editor().move_home(),
        KeyCode::End => form.current_editor().move_end(),
        _ => {}
    }
    Ok(false)
}

fn handle_global_key_bindings(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let keys = app.config.key_bindings.clone();

    if pressed(key_event, &keys.quit)? {
        return Ok(true);
    }
    if pressed(key_event, &keys.help)? {
        app.enter_help_mode();
        return Ok(false);
    }
    if pressed(key_event, &keys.logout)? {
        app.logout();
        return Ok(false);
    }

    if pressed(key_event, &keys.tab_left)? {
        app.previous_tab();
        return Ok(false);
    }
    if pressed(key_event, &keys.tab_right)? {
        app.next_tab();
        return Ok(false);
    }
    for (key, screen) in [&keys.tab_1, &keys.tab_2, &keys.tab_3, &keys.tab_4]
        .into_iter()
        .zip(Screen::TABS)
    {
        if pressed(key_event, key)? {
            app.go_to(screen);
            return Ok(false);
        }
    }

    if key_event.code == KeyCode::Up || pressed(key_event, &keys.list_up)? {
        app.move_selection_up();
        return Ok(false);
    }
    if key_event.code == KeyCode::Down || pressed(key_event, &keys.list_down)? {
        app.move_selection_down();
        return Ok(false);
    }

    match app.screen {
        Screen::Dashboard => {
            if pressed(key_event, &keys.details)? {
                app.run_dashboard_action();
            }
        }
        Screen::Subjects => {
            if pressed(key_event, &keys.new)? {
                app.request_quick_add();
            } else if pressed(key_event, &keys.delete)? {
                app.request_delete();
            } else if pressed(key_event, &keys.details)? {
                app.show_selected_details();
            } else if pressed(key_event, &keys.add_subject_task)? {
                app.add_task_to_selected_subject();
            }
        }
        Screen::Tasks => {
            if pressed(key_event, &keys.new)? {
                app.request_quick_add();
            } else if pressed(key_event, &keys.delete)? {
                app.request_delete();
            } else if pressed(key_event, &keys.toggle_task_status)? {
                app.toggle_selected_task();
            } else if pressed(key_event, &keys.filter_status)? {
                app.cycle_status_filter();
            } else if pressed(key_event, &keys.filter_subject)? {
                app.cycle_subject_filter();
            }
        }
        Screen::Notes => {
            if pressed(key_event, &keys.new)? {
                app.request_quick_add();
            } else if pressed(key_event, &keys.delete)? {
                app.request_delete();
            } else if pressed(key_event, &keys.details)? {
                app.show_selected_details();
            } else if pressed(key_event, &keys.edit)? {
                app.enter_edit_note();
            } else if pressed(key_event, &keys.search)? {
                app.enter_search_mode();
            }
        }
        Screen::Home | Screen::Login => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::session::{MemorySessionStorage, SessionStore, demo_user};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(rt: &tokio::runtime::Runtime, signed_in: bool) -> App {
        let storage = if signed_in {
            MemorySessionStorage::with_value(serde_json::to_string(&demo_user()).unwrap())
        } else {
            MemorySessionStorage::new()
        };
        let mut session = SessionStore::new(Box::new(storage), Duration::ZERO);
        session.restore();
        App::new(Config::default(), session, rt.handle().clone())
    }

    #[test]
    fn number_keys_switch_tabs() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let mut app = app_with(&rt, true);
        handle_key_event(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.screen, Screen::Tasks);
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.screen, Screen::Notes);
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn new_key_opens_confirm_and_enter_accepts() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let mut app = app_with(&rt, true);
        app.go_to(Screen::Notes);
        handle_key_event(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.mode, Mode::Confirm);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.notes().len(), 2);
        assert_eq!(app.store.notes()[1].tags, vec!["nueva", "nota"]);
    }

    #[test]
    fn typing_on_login_screen_fills_the_form() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let mut app = app_with(&rt, false);
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.screen, Screen::Login);
        handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert_eq!(app.login_form.email.text(), "q");
        assert_eq!(app.screen, Screen::Login);
    }

    #[test]
    fn quit_key_quits_from_view_mode() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let mut app = app_with(&rt, true);
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap());
    }
}
