use super::mode::Mode;
use super::section::Section;
use crate::clipboard::ClipboardWriter;
use crate::copy_state::{CopyKey, CopyOutcome};
use crate::keybindings::{KeyBinding, KeybindingCache};
use crate::session::{Session, Slot};
use crate::ui::theme::Theme;
use std::time::{Duration, Instant};

const STATUS_MESSAGE_DURATION: Duration = Duration::from_secs(3);

pub struct AppState {
    pub session: Session,
    pub clipboard: Box<dyn ClipboardWriter>,
    pub mode: Mode,
    /// Index into `Section::visible`.
    pub focus: usize,
    /// Highlighted button inside the focused section.
    pub cursor: usize,
    pub should_quit: bool,
    pub theme: Theme,
    pub keybindings: KeybindingCache,
    pub pending_key: Option<KeyBinding>,
    pub pending_key_time: Option<Instant>,
    pub timeoutlen: u64,
    pub status_message: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(
        session: Session,
        clipboard: Box<dyn ClipboardWriter>,
        theme: Theme,
        keybindings: KeybindingCache,
        timeoutlen: u64,
    ) -> Self {
        let mut state = Self {
            session,
            clipboard,
            mode: Mode::Pick,
            focus: 0,
            cursor: 0,
            should_quit: false,
            theme,
            keybindings,
            pending_key: None,
            pending_key_time: None,
            timeoutlen,
            status_message: None,
        };
        // Start on the package manager row; the platform row has one entry today.
        state.focus_section(1);
        state
    }

    pub fn sections(&self) -> Vec<Section> {
        Section::visible(&self.session)
    }

    pub fn focused_section(&self) -> Section {
        let sections = self.sections();
        sections
            .get(self.focus)
            .copied()
            .unwrap_or(Section::PackageManager)
    }

    /// Move focus to `index` (clamped) and put the cursor on that row's active button.
    pub fn focus_section(&mut self, index: usize) {
        let count = self.sections().len();
        self.focus = index.min(count.saturating_sub(1));
        let section = self.focused_section();
        self.cursor = section.active_index(&self.session).unwrap_or(0);
    }

    pub fn next_section(&mut self) {
        let count = self.sections().len();
        if self.focus + 1 < count {
            self.focus_section(self.focus + 1);
        }
    }

    pub fn prev_section(&mut self) {
        if self.focus > 0 {
            self.focus_section(self.focus - 1);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.focused_section().labels(&self.session).len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Apply the button under the cursor to the session.
    pub fn select_at_cursor(&mut self) {
        let section = self.focused_section();
        let labels = section.labels(&self.session);
        let Some(label) = labels.get(self.cursor) else {
            return;
        };

        match section {
            Section::Platform => {
                self.session.select_platform(label);
            }
            Section::PackageManager => {
                self.session.select_package_manager(label);
            }
            Section::Framework => {
                self.session.select_framework(label);
            }
            Section::Library(idx) => {
                let group_id = self
                    .session
                    .package_manager()
                    .and_then(|pm| pm.library_groups.get(idx))
                    .map(|group| group.id.clone());
                if let Some(group_id) = group_id {
                    self.session.select_library(&group_id, label);
                }
            }
        }
    }

    /// The slot the copy action targets from the focused section.
    pub fn focused_slot(&self) -> Option<Slot> {
        match self.focused_section() {
            Section::Library(idx) => self
                .session
                .library_sections()
                .get(idx)
                .and_then(|section| section.slot()),
            _ => Some(self.session.framework_slot()),
        }
    }

    pub fn copy_focused(&mut self, now: Instant) -> CopyOutcome {
        let Some(slot) = self.focused_slot() else {
            return CopyOutcome::Skipped;
        };
        let outcome = self.session.copy(&slot, self.clipboard.as_mut(), now);
        match outcome {
            CopyOutcome::Copied => self.set_status_message(format!("Copied: {}", slot.command), now),
            CopyOutcome::Failed => {
                self.set_status_message("Copy failed, see log for details".to_string(), now)
            }
            CopyOutcome::Skipped => self.set_status_message("Nothing to copy".to_string(), now),
        }
        outcome
    }

    pub fn is_copied(&self, key: &CopyKey, now: Instant) -> bool {
        self.session.is_copied(key, now)
    }

    pub fn set_status_message(&mut self, message: String, now: Instant) {
        self.status_message = Some((message, now));
    }

    pub fn clear_expired_status_message(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.status_message {
            if now.duration_since(*shown_at) >= STATUS_MESSAGE_DURATION {
                self.status_message = None;
            }
        }
    }

    /// Drop expired copy flags and status text. Called once per loop tick.
    pub fn tick(&mut self, now: Instant) {
        self.session.expire_copy_flags(now);
        self.clear_expired_status_message(now);
    }

    pub fn pending_key_expired(&self, now: Instant) -> bool {
        self.pending_key_time
            .is_some_and(|t| now.duration_since(t) >= Duration::from_millis(self.timeoutlen))
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clipboard::testing::RecordingClipboard;
    use crate::dataset::Dataset;

    pub fn test_state() -> AppState {
        let dataset = Dataset::from_json_str(
            r#"[{
                "name": "npm",
                "frameworks": [
                    {"name": "next", "command": "npx create-next-app"},
                    {"name": "vue", "command": {"installer": "npm", "packageName": "create vue@latest"}}
                ],
                "libraryGroups": {"state": [
                    {"name": "redux", "command": "npm install redux"},
                    {"name": "zustand", "command": "npm install zustand"}
                ]}
            }, {
                "name": "sudo",
                "frameworks": [{"name": "x", "command": "apt install x"}]
            }]"#,
        )
        .unwrap();
        AppState::new(
            Session::new(dataset),
            Box::new(RecordingClipboard::default()),
            Theme::default(),
            KeybindingCache::default(),
            1000,
        )
    }

    #[test]
    fn test_starts_on_package_manager_row() {
        let state = test_state();
        assert_eq!(state.focused_section(), Section::PackageManager);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_select_package_manager_and_framework() {
        let mut state = test_state();
        state.select_at_cursor();
        assert_eq!(state.session.framework_command(), "npx create-next-app");

        state.next_section();
        assert_eq!(state.focused_section(), Section::Framework);
        assert_eq!(state.cursor, 0);

        state.move_cursor_right();
        state.select_at_cursor();
        assert_eq!(state.session.framework_command(), "npm create vue@latest");

        // Clamped at the last button.
        state.move_cursor_right();
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_library_section_selection() {
        let mut state = test_state();
        state.select_at_cursor();
        state.focus_section(3);
        assert_eq!(state.focused_section(), Section::Library(0));

        state.move_cursor_right();
        state.select_at_cursor();
        let slot = state.focused_slot().unwrap();
        assert_eq!(slot.command, "npm install zustand");
        assert_eq!(slot.key.to_string(), "lib-state-zustand");
    }

    #[test]
    fn test_copy_focused_sets_status() {
        let now = Instant::now();
        let mut state = test_state();

        assert_eq!(state.copy_focused(now), CopyOutcome::Skipped);
        assert_eq!(state.status_message.as_ref().unwrap().0, "Nothing to copy");

        state.select_at_cursor();
        assert_eq!(state.copy_focused(now), CopyOutcome::Copied);
        assert!(state.is_copied(&CopyKey::Framework, now));
        assert_eq!(
            state.status_message.as_ref().unwrap().0,
            "Copied: npx create-next-app"
        );
    }

    #[test]
    fn test_copy_failure_sets_status_only() {
        let now = Instant::now();
        let mut state = test_state();
        state.clipboard = Box::new(RecordingClipboard::failing());
        state.select_at_cursor();

        assert_eq!(state.copy_focused(now), CopyOutcome::Failed);
        assert!(!state.is_copied(&CopyKey::Framework, now));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_tick_expires_flags_and_status() {
        let now = Instant::now();
        let mut state = test_state();
        state.select_at_cursor();
        state.copy_focused(now);

        state.tick(now + Duration::from_secs(1));
        assert!(state.status_message.is_some());
        assert!(state.is_copied(&CopyKey::Framework, now + Duration::from_secs(1)));

        let later = now + Duration::from_secs(3);
        state.tick(later);
        assert!(state.status_message.is_none());
        assert!(!state.is_copied(&CopyKey::Framework, later));
    }

    #[test]
    fn test_switching_manager_shrinks_sections() {
        let mut state = test_state();
        state.select_at_cursor();
        assert_eq!(state.sections().len(), 4);

        state.move_cursor_right();
        state.select_at_cursor();
        assert_eq!(state.sections().len(), 3);
        assert_eq!(state.session.framework_command(), "sudo apt install x");
    }
}
