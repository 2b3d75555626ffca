use super::mode::Mode;
use super::state::AppState;
use crate::keybindings::{Action, KeyBinding, KeyLookupResult};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::debug;

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    handle_key_event_at(key, state, Instant::now())
}

pub fn handle_key_event_at(key: KeyEvent, state: &mut AppState, now: Instant) -> Result<()> {
    // Ctrl+C always quits, whatever the bindings say
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return Ok(());
    }

    match state.mode {
        Mode::Pick => handle_pick_mode(key, state, now),
        Mode::Help => {
            if let Some(action) = state.keybindings.get_help_action(&key) {
                execute_action(action, state, now);
            }
        }
    }
    Ok(())
}

fn handle_pick_mode(key: KeyEvent, state: &mut AppState, now: Instant) {
    let pending = state.pending_key.take();
    state.pending_key_time = None;

    match state.keybindings.lookup_picker(&key, pending) {
        KeyLookupResult::Action(action) => execute_action(action, state, now),
        KeyLookupResult::Pending => {
            state.pending_key = Some(KeyBinding::from_event(&key));
            state.pending_key_time = Some(now);
        }
        KeyLookupResult::None => {
            // A broken sequence: treat the new key on its own.
            if pending.is_some() {
                handle_pick_mode(key, state, now);
            }
        }
    }
}

/// Fire the single-key action of a sequence starter once `timeoutlen` has passed.
pub fn check_pending_timeout(state: &mut AppState, now: Instant) {
    if !state.pending_key_expired(now) {
        return;
    }
    let pending = state.pending_key.take();
    state.clear_pending_key();
    if let Some(action) = pending.and_then(|first| state.keybindings.picker_single_action(first)) {
        execute_action(action, state, now);
    }
}

pub fn execute_action(action: Action, state: &mut AppState, now: Instant) {
    debug!(%action, "Executing action");
    match action {
        Action::MoveLeft => state.move_cursor_left(),
        Action::MoveRight => state.move_cursor_right(),
        Action::NextSection => state.next_section(),
        Action::PrevSection => state.prev_section(),
        Action::FirstSection => state.focus_section(0),
        Action::LastSection => state.focus_section(usize::MAX),
        Action::Select => state.select_at_cursor(),
        Action::Copy => {
            state.copy_focused(now);
        }
        Action::ToggleHelp => {
            state.mode = match state.mode {
                Mode::Pick => Mode::Help,
                Mode::Help => Mode::Pick,
            };
        }
        Action::CloseHelp => state.mode = Mode::Pick,
        Action::Quit => state.should_quit = true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::section::Section;
    use crate::app::state::tests::test_state;
    use crate::copy_state::CopyKey;
    use std::time::Duration;

    fn press(state: &mut AppState, code: KeyCode, now: Instant) {
        handle_key_event_at(KeyEvent::new(code, KeyModifiers::NONE), state, now).unwrap();
    }

    #[test]
    fn test_select_and_copy_with_keys() {
        let now = Instant::now();
        let mut state = test_state();

        press(&mut state, KeyCode::Enter, now);
        assert_eq!(state.session.framework_command(), "npx create-next-app");

        press(&mut state, KeyCode::Char('y'), now);
        assert!(state.is_copied(&CopyKey::Framework, now));
    }

    #[test]
    fn test_section_navigation() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Enter, now);

        press(&mut state, KeyCode::Char('j'), now);
        assert_eq!(state.focused_section(), Section::Framework);
        press(&mut state, KeyCode::Tab, now);
        assert_eq!(state.focused_section(), Section::Library(0));
        press(&mut state, KeyCode::Char('j'), now);
        assert_eq!(state.focused_section(), Section::Library(0));
        press(&mut state, KeyCode::Char('k'), now);
        assert_eq!(state.focused_section(), Section::Framework);
    }

    #[test]
    fn test_gg_sequence_and_last_section() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Enter, now);

        handle_key_event_at(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT), &mut state, now)
            .unwrap();
        assert_eq!(state.focused_section(), Section::Library(0));

        press(&mut state, KeyCode::Char('g'), now);
        assert!(state.pending_key.is_some());
        press(&mut state, KeyCode::Char('g'), now);
        assert!(state.pending_key.is_none());
        assert_eq!(state.focused_section(), Section::Platform);
    }

    #[test]
    fn test_broken_sequence_handles_second_key() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Enter, now);

        press(&mut state, KeyCode::Char('g'), now);
        press(&mut state, KeyCode::Char('j'), now);
        assert!(state.pending_key.is_none());
        assert_eq!(state.focused_section(), Section::Framework);
    }

    #[test]
    fn test_pending_key_times_out() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Char('g'), now);

        check_pending_timeout(&mut state, now + Duration::from_millis(500));
        assert!(state.pending_key.is_some());

        check_pending_timeout(&mut state, now + Duration::from_millis(1000));
        assert!(state.pending_key.is_none());
    }

    #[test]
    fn test_library_pick_with_keys() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Enter, now);
        press(&mut state, KeyCode::Char('G'), now);
        press(&mut state, KeyCode::Char('l'), now);
        press(&mut state, KeyCode::Char(' '), now);
        press(&mut state, KeyCode::Char('c'), now);

        assert!(state.is_copied(&CopyKey::library("state", "zustand"), now));
        assert!(!state.is_copied(&CopyKey::Framework, now));
    }

    #[test]
    fn test_help_toggle() {
        let now = Instant::now();
        let mut state = test_state();

        press(&mut state, KeyCode::Char('?'), now);
        assert_eq!(state.mode, Mode::Help);

        // Picker keys do nothing while help is open
        press(&mut state, KeyCode::Enter, now);
        assert_eq!(state.session.framework_command(), "");

        press(&mut state, KeyCode::Esc, now);
        assert_eq!(state.mode, Mode::Pick);
    }

    #[test]
    fn test_quit_keys() {
        let now = Instant::now();
        let mut state = test_state();
        press(&mut state, KeyCode::Char('q'), now);
        assert!(state.should_quit);

        let mut state = test_state();
        handle_key_event_at(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state,
            now,
        )
        .unwrap();
        assert!(state.should_quit);
    }
}
