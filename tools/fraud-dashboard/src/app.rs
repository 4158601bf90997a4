use crate::errors::DashboardError;
use crate::hotkeys::{action_for_key, HotkeyAction};
use crate::logging::{log_event, JsonlLogger, LogEvent};
use crate::tui::{draw_frame, DashboardFrame};
use crate::view::{ActionOutcome, Dashboard};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde_json::json;
use std::io::{self, Stdout};
use std::time::Duration;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(250);

type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

struct TerminalGuard {
    terminal: DashboardTerminal,
}

impl TerminalGuard {
    fn enter() -> Result<Self, DashboardError> {
        enable_raw_mode()
            .map_err(|e| DashboardError::Render(format!("failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(DashboardError::Render(format!(
                "failed to enter alternate screen: {err}"
            )));
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(mut terminal) => {
                let _ = terminal.hide_cursor();
                Ok(Self { terminal })
            }
            Err(err) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(DashboardError::Render(format!(
                    "failed to initialize terminal: {err}"
                )))
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub fn key_to_action(key: &KeyEvent) -> Option<HotkeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HotkeyAction::Quit)
        }
        KeyCode::Esc => Some(HotkeyAction::Quit),
        KeyCode::Tab | KeyCode::Right => Some(HotkeyAction::NextTab),
        KeyCode::BackTab | KeyCode::Left => Some(HotkeyAction::PreviousTab),
        KeyCode::Char(ch) => action_for_key(ch),
        _ => None,
    }
}

/// Runs the dashboard until the user quits. Events are handled one at a time.
pub fn run_interactive(
    dashboard: &mut Dashboard,
    logger: Option<&JsonlLogger>,
) -> Result<(), DashboardError> {
    let mut guard = TerminalGuard::enter()?;
    let mut view = DashboardFrame::build(dashboard.document(), dashboard.state())?;
    let mut dirty = true;

    loop {
        if dirty {
            guard
                .terminal
                .draw(|frame| draw_frame(frame, &view))
                .map_err(|e| DashboardError::Render(e.to_string()))?;
            dirty = false;
        }

        if !event::poll(EVENT_POLL_TIMEOUT).map_err(|e| DashboardError::Io(e.to_string()))? {
            continue;
        }
        let key = match event::read().map_err(|e| DashboardError::Io(e.to_string()))? {
            Event::Key(key) => key,
            Event::Resize(_, _) => {
                dirty = true;
                continue;
            }
            _ => continue,
        };
        let Some(action) = key_to_action(&key) else {
            continue;
        };

        match dashboard.apply(action) {
            ActionOutcome::Quit => break,
            ActionOutcome::Unchanged => {}
            ActionOutcome::Switched { from, to } => {
                log_event(
                    logger,
                    &LogEvent::info(
                        "tab_selected",
                        json!({"from": from.as_str(), "to": to.as_str()}),
                    ),
                );
                view = DashboardFrame::build(dashboard.document(), dashboard.state())?;
                dirty = true;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::key_to_action;
    use crate::hotkeys::HotkeyAction;
    use crate::types::Tab;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    #[test]
    fn terminal_keys_map_to_actions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            key_to_action(&press(KeyCode::Char('3'))),
            Some(HotkeyAction::SelectTab(Tab::Evaluation))
        );
        assert_eq!(key_to_action(&press(KeyCode::Tab)), Some(HotkeyAction::NextTab));
        assert_eq!(
            key_to_action(&press(KeyCode::BackTab)),
            Some(HotkeyAction::PreviousTab)
        );
        assert_eq!(key_to_action(&press(KeyCode::Esc)), Some(HotkeyAction::Quit));
        assert_eq!(
            key_to_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HotkeyAction::Quit)
        );
        assert_eq!(key_to_action(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(&key), None);
    }
}
