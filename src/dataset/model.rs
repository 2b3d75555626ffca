use std::collections::BTreeMap;

/// How a framework's install command is expressed in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// A ready-to-run shell command.
    Literal(String),
    /// An installer invocation assembled at resolve time.
    Structured {
        installer: String,
        package_name: String,
        versions: Vec<String>,
    },
}

impl CommandSpec {
    pub fn literal(command: impl Into<String>) -> Self {
        Self::Literal(command.into())
    }

    pub fn structured(installer: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self::Structured {
            installer: installer.into(),
            package_name: package_name.into(),
            versions: Vec::new(),
        }
    }

    pub fn versions(&self) -> &[String] {
        match self {
            Self::Literal(_) => &[],
            Self::Structured { versions, .. } => versions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkEntry {
    pub name: String,
    pub command: CommandSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryGroup {
    pub id: String,
    pub title: String,
    pub libraries: Vec<LibraryEntry>,
}

impl LibraryGroup {
    pub fn library(&self, name: &str) -> Option<&LibraryEntry> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    pub fn first_library(&self) -> Option<&LibraryEntry> {
        self.libraries.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageManagerEntry {
    pub name: String,
    /// Verbs this manager uses, e.g. `install -> "add"` for yarn.
    pub actions: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    pub frameworks: Vec<FrameworkEntry>,
    pub library_groups: Vec<LibraryGroup>,
}

impl PackageManagerEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn framework(&self, name: &str) -> Option<&FrameworkEntry> {
        self.frameworks.iter().find(|fw| fw.name == name)
    }

    pub fn first_framework(&self) -> Option<&FrameworkEntry> {
        self.frameworks.first()
    }

    pub fn library_group(&self, id: &str) -> Option<&LibraryGroup> {
        self.library_groups.iter().find(|group| group.id == id)
    }

    pub fn install_action(&self) -> &str {
        self.actions.get("install").map(String::as_str).unwrap_or("")
    }
}

/// Data-declared formatting for one installer.
///
/// `format` may reference `{installer}`, `{action}` and `{package}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerFormat {
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub platforms: Vec<String>,
    pub installers: BTreeMap<String, InstallerFormat>,
    pub package_managers: Vec<PackageManagerEntry>,
}

impl Dataset {
    pub fn new(package_managers: Vec<PackageManagerEntry>) -> Self {
        Self {
            platforms: default_platforms(),
            installers: BTreeMap::new(),
            package_managers,
        }
    }

    pub fn package_manager(&self, name: &str) -> Option<&PackageManagerEntry> {
        self.package_managers.iter().find(|pm| pm.name == name)
    }

    pub fn has_platform(&self, name: &str) -> bool {
        self.platforms.iter().any(|p| p == name)
    }

    pub fn installer_format(&self, installer: &str) -> Option<&InstallerFormat> {
        self.installers.get(installer)
    }

    pub fn default_platform(&self) -> &str {
        self.platforms.first().map(String::as_str).unwrap_or(DEFAULT_PLATFORM)
    }
}

pub const DEFAULT_PLATFORM: &str = "Windows";

pub fn default_platforms() -> Vec<String> {
    vec![DEFAULT_PLATFORM.to_string()]
}
