use crate::dataset::{Dataset, LibraryEntry, LibraryGroup, PackageManagerEntry};
use std::collections::HashMap;

/// What the user has picked so far.
///
/// Library choices are keyed by the dataset's own group ids. A group with no
/// entry falls back to its first library for display, without that default
/// ever being written here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub platform: String,
    pub package_manager: Option<String>,
    pub framework: Option<String>,
    pub library_selections: HashMap<String, String>,
}

impl Selection {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            package_manager: None,
            framework: None,
            library_selections: HashMap::new(),
        }
    }

    pub fn current_package_manager<'a>(&self, dataset: &'a Dataset) -> Option<&'a PackageManagerEntry> {
        self.package_manager
            .as_deref()
            .and_then(|name| dataset.package_manager(name))
    }

    /// Explicit choice for `group`, if the user made one.
    pub fn explicit_library<'a>(&self, group: &'a LibraryGroup) -> Option<&'a LibraryEntry> {
        self.library_selections
            .get(&group.id)
            .and_then(|name| group.library(name))
    }

    /// The library shown for `group`: the explicit choice, else the first entry.
    pub fn effective_library<'a>(&self, group: &'a LibraryGroup) -> Option<&'a LibraryEntry> {
        self.explicit_library(group).or_else(|| group.first_library())
    }

    pub fn reset_for_package_manager(&mut self, pm: impl Into<String>) {
        self.package_manager = Some(pm.into());
        self.framework = None;
        self.library_selections.clear();
    }
}
