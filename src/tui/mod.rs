pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, CategoryPalette, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Run the interactive dashboard until the user quits.
///
/// The terminal is restored before returning, whether the loop ended
/// normally or with an error.
pub async fn run_dashboard(mut app: App, tick_rate_ms: u64) -> anyhow::Result<()> {
    // Buffer log output while the TUI is active to prevent it corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(tick_rate_ms);

    tracing::info!(
        companies = app.companies.len(),
        selected = app.selected_company().unwrap_or("-"),
        "dashboard started"
    );

    let result = async {
        loop {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;

            match events.next().await {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Tick => app.update_flash(),
                Event::Resize => {}
            }

            if app.should_quit {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Company selection
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_company(),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.previous_company(),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(n) = c.to_digit(10) {
                    app.select_number(n as usize);
                }
            }

            // Comparison grouping
            KeyCode::Char('c') => app.toggle_comparison(),

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn reference_app() -> App {
        App::new(Dataset::reference(), None, ThemeColors::dark()).unwrap()
    }

    #[test]
    fn test_arrow_keys_change_selection() {
        let mut app = reference_app();
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.selected_company(), Some("Microsoft"));
        handle_key_event(&mut app, key(KeyCode::Left));
        handle_key_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.selected_company(), Some("Amazon"));
    }

    #[test]
    fn test_digit_jumps_to_company() {
        let mut app = reference_app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.selected_company(), Some("Google"));
    }

    #[test]
    fn test_c_toggles_comparison_but_ctrl_c_quits() {
        let mut app = reference_app();
        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.comparison_mode, app::ComparisonMode::ByCategory);
        assert!(!app.should_quit);

        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = reference_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, app::InputMode::Help);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_quits() {
        let mut app = reference_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
