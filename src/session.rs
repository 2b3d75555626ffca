//! One picking session: the dataset, what the user selected, and which
//! command slots were copied recently.

use crate::clipboard::ClipboardWriter;
use crate::copy_state::{CopyKey, CopyOutcome, CopyTracker};
use crate::dataset::{Dataset, LibraryEntry, LibraryGroup, PackageManagerEntry};
use crate::resolver::{resolve_framework_command, resolve_library_command};
use crate::selection::Selection;
use std::time::Instant;
use tracing::debug;

/// A displayed command together with the key of its copy indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub key: CopyKey,
    pub command: String,
}

/// One library group as it is shown for the current package manager.
#[derive(Debug, Clone, Copy)]
pub struct LibrarySection<'a> {
    pub group: &'a LibraryGroup,
    /// Explicit choice, else the group's first library.
    pub selected: Option<&'a LibraryEntry>,
}

impl LibrarySection<'_> {
    pub fn slot(&self) -> Option<Slot> {
        self.selected.map(|lib| Slot {
            key: CopyKey::library(&self.group.id, &lib.name),
            command: resolve_library_command(lib),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    selection: Selection,
    framework_command: String,
    copy_state: CopyTracker,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        let selection = Selection::new(dataset.default_platform());
        Self {
            dataset,
            selection,
            framework_command: String::new(),
            copy_state: CopyTracker::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn package_manager(&self) -> Option<&PackageManagerEntry> {
        self.selection.current_package_manager(&self.dataset)
    }

    /// Switch platform. Nothing else depends on it today, so nothing cascades.
    pub fn select_platform(&mut self, platform: &str) -> bool {
        if !self.dataset.has_platform(platform) {
            debug!(platform, "Ignoring unknown platform");
            return false;
        }
        self.selection.platform = platform.to_string();
        true
    }

    /// Switch package manager, resetting everything below it and picking the
    /// manager's first framework when it has one.
    ///
    /// Returns `false` when the manager is not in the dataset; the selection
    /// is still updated and every slot then resolves empty.
    pub fn select_package_manager(&mut self, pm: &str) -> bool {
        self.selection.reset_for_package_manager(pm);
        self.framework_command.clear();
        self.copy_state.clear(&CopyKey::Framework);
        self.copy_state.clear_libraries();

        let Some(entry) = self.dataset.package_manager(pm) else {
            debug!(pm, "Selected package manager not in dataset");
            return false;
        };

        if let Some(first) = entry.first_framework() {
            let name = first.name.clone();
            self.select_framework(&name);
        }
        true
    }

    /// Requires a package manager. Only the framework copy indicator resets.
    pub fn select_framework(&mut self, fw: &str) -> bool {
        let Some(pm) = self.selection.package_manager.clone() else {
            debug!(fw, "Framework selected without a package manager");
            return false;
        };

        self.selection.framework = Some(fw.to_string());
        self.framework_command = resolve_framework_command(&self.dataset, &pm, fw);
        self.copy_state.clear(&CopyKey::Framework);
        !self.framework_command.is_empty()
    }

    /// Record an explicit library choice. Unknown groups or libraries are ignored.
    pub fn select_library(&mut self, group_id: &str, library: &str) -> bool {
        let Some(group) = self
            .package_manager()
            .and_then(|pm| pm.library_group(group_id))
        else {
            return false;
        };
        if group.library(library).is_none() {
            return false;
        }

        self.selection
            .library_selections
            .insert(group_id.to_string(), library.to_string());
        true
    }

    pub fn framework_command(&self) -> &str {
        &self.framework_command
    }

    pub fn framework_slot(&self) -> Slot {
        Slot {
            key: CopyKey::Framework,
            command: self.framework_command.clone(),
        }
    }

    pub fn library_sections(&self) -> Vec<LibrarySection<'_>> {
        let Some(pm) = self.package_manager() else {
            return Vec::new();
        };
        pm.library_groups
            .iter()
            .map(|group| LibrarySection {
                group,
                selected: self.selection.effective_library(group),
            })
            .collect()
    }

    pub fn library_section(&self, group_id: &str) -> Option<LibrarySection<'_>> {
        self.library_sections()
            .into_iter()
            .find(|section| section.group.id == group_id)
    }

    /// Every slot currently on screen, framework first.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        if self.selection.framework.is_some() {
            slots.push(self.framework_slot());
        }
        slots.extend(self.library_sections().iter().filter_map(LibrarySection::slot));
        slots
    }

    pub fn copy(
        &mut self,
        slot: &Slot,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> CopyOutcome {
        self.copy_state.copy(&slot.key, &slot.command, clipboard, now)
    }

    pub fn copy_framework(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> CopyOutcome {
        let slot = self.framework_slot();
        self.copy(&slot, clipboard, now)
    }

    pub fn copy_library(
        &mut self,
        group_id: &str,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> CopyOutcome {
        match self.library_section(group_id).and_then(|section| section.slot()) {
            Some(slot) => self.copy(&slot, clipboard, now),
            None => CopyOutcome::Skipped,
        }
    }

    pub fn is_copied(&self, key: &CopyKey, now: Instant) -> bool {
        self.copy_state.is_copied(key, now)
    }

    pub fn expire_copy_flags(&mut self, now: Instant) -> Vec<CopyKey> {
        self.copy_state.expire(now)
    }
}
