//! "Recently copied" indicators, one per displayed command slot.
//!
//! Each key holds a revert deadline. A flag reads as set until its deadline
//! passes; copying the same key again moves the deadline forward.

use crate::clipboard::ClipboardWriter;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a slot shows its "copied" glyph after a successful copy.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_secs(3);

/// Result of a copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
    /// Nothing to copy; the clipboard was not touched.
    Skipped,
}

/// Identifies one command slot on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CopyKey {
    Framework,
    Library { group: String, library: String },
}

impl CopyKey {
    pub fn library(group: impl Into<String>, library: impl Into<String>) -> Self {
        Self::Library {
            group: group.into(),
            library: library.into(),
        }
    }

    pub fn is_library(&self) -> bool {
        matches!(self, Self::Library { .. })
    }
}

impl fmt::Display for CopyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framework => write!(f, "framework"),
            Self::Library { group, library } => write!(f, "lib-{}-{}", group, library),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CopyTracker {
    deadlines: HashMap<CopyKey, Instant>,
}

impl CopyTracker {
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
        }
    }

    /// Set the flag for `key`, superseding any pending revert.
    pub fn mark_copied(&mut self, key: CopyKey, now: Instant) {
        self.deadlines.insert(key, now + COPY_FEEDBACK_DELAY);
    }

    /// Write `text` to the clipboard and flag `key` on success.
    ///
    /// Empty text is skipped outright. A failed write leaves the flag as it
    /// was and is only logged.
    pub fn copy(
        &mut self,
        key: &CopyKey,
        text: &str,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> CopyOutcome {
        if text.is_empty() {
            return CopyOutcome::Skipped;
        }

        match clipboard.write_text(text) {
            Ok(()) => {
                debug!(key = %key, "Copied command");
                self.mark_copied(key.clone(), now);
                CopyOutcome::Copied
            }
            Err(err) => {
                warn!(key = %key, error = %format!("{err:#}"), "Clipboard write failed");
                CopyOutcome::Failed
            }
        }
    }

    pub fn is_copied(&self, key: &CopyKey, now: Instant) -> bool {
        self.deadlines
            .get(key)
            .is_some_and(|deadline| now < *deadline)
    }

    pub fn clear(&mut self, key: &CopyKey) {
        self.deadlines.remove(key);
    }

    pub fn clear_libraries(&mut self) {
        self.deadlines.retain(|key, _| !key.is_library());
    }

    /// Drop flags whose deadline has passed. Returns the keys that reverted.
    pub fn expire(&mut self, now: Instant) -> Vec<CopyKey> {
        let expired: Vec<CopyKey> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.deadlines.remove(key);
        }
        expired
    }

    pub fn active_count(&self, now: Instant) -> usize {
        self.deadlines.values().filter(|deadline| now < **deadline).count()
    }
}

impl Default for CopyTracker {
    fn default() -> Self {
        Self::new()
    }
}
