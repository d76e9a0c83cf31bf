//! ==============================================================================
//! events.rs - keyboard input
//! ==============================================================================
//!
//! polls crossterm for one event and turns it into an InputEvent. quitting
//! and toggles are applied to the dashboard here; refresh is forwarded to the
//! poller by the frame loop.
//!
//! ==============================================================================

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::dashboard::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Refresh,
    Pause,
    Help,
    None,
}

/// waits up to `timeout` for input; polling errors read as no input
pub fn poll_event(timeout: Duration) -> InputEvent {
    match event::poll(timeout) {
        Ok(true) => {}
        _ => return InputEvent::None,
    }

    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => translate_key(key),
        _ => InputEvent::None,
    }
}

/// applies the dashboard-local part of an event
pub fn apply_event(dash: &mut Dashboard, event: InputEvent) {
    match event {
        InputEvent::Quit => dash.should_quit = true,
        InputEvent::Pause => dash.toggle_pause(),
        InputEvent::Help => dash.show_help = !dash.show_help,
        InputEvent::Refresh | InputEvent::None => {}
    }
}

fn translate_key(key: KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Refresh,
        KeyCode::Char('p') | KeyCode::Char('P') => InputEvent::Pause,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => InputEvent::Help,
        _ => InputEvent::None,
    }
}
