use crate::session::Session;

/// A focusable row of buttons on the picker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Platform,
    PackageManager,
    Framework,
    /// Index into the current package manager's library groups.
    Library(usize),
}

impl Section {
    /// Sections on screen for the current selection, top to bottom.
    pub fn visible(session: &Session) -> Vec<Section> {
        let mut sections = vec![Section::Platform, Section::PackageManager];
        if let Some(pm) = session.package_manager() {
            if !pm.frameworks.is_empty() {
                sections.push(Section::Framework);
            }
            sections.extend((0..pm.library_groups.len()).map(Section::Library));
        }
        sections
    }

    /// Button labels in this section.
    pub fn labels(self, session: &Session) -> Vec<String> {
        let dataset = session.dataset();
        match self {
            Section::Platform => dataset.platforms.clone(),
            Section::PackageManager => dataset
                .package_managers
                .iter()
                .map(|pm| pm.name.clone())
                .collect(),
            Section::Framework => session
                .package_manager()
                .map(|pm| pm.frameworks.iter().map(|fw| fw.name.clone()).collect())
                .unwrap_or_default(),
            Section::Library(idx) => session
                .package_manager()
                .and_then(|pm| pm.library_groups.get(idx))
                .map(|group| group.libraries.iter().map(|lib| lib.name.clone()).collect())
                .unwrap_or_default(),
        }
    }

    /// Index of the button currently shown as active.
    pub fn active_index(self, session: &Session) -> Option<usize> {
        let selection = session.selection();
        let active = match self {
            Section::Platform => Some(selection.platform.clone()),
            Section::PackageManager => selection.package_manager.clone(),
            Section::Framework => selection.framework.clone(),
            Section::Library(idx) => session
                .library_sections()
                .get(idx)
                .and_then(|section| section.selected)
                .map(|lib| lib.name.clone()),
        }?;
        self.labels(session).iter().position(|label| *label == active)
    }

    pub fn title(self, session: &Session) -> String {
        match self {
            Section::Platform => "Platform".to_string(),
            Section::PackageManager => "Package manager".to_string(),
            Section::Framework => "Framework".to_string(),
            Section::Library(idx) => session
                .package_manager()
                .and_then(|pm| pm.library_groups.get(idx))
                .map(|group| group.title.clone())
                .unwrap_or_default(),
        }
    }
}
