pub mod error;
pub mod model;
pub mod raw;

pub use error::DatasetError;
pub use model::{
    CommandSpec, Dataset, FrameworkEntry, InstallerFormat, LibraryEntry, LibraryGroup,
    PackageManagerEntry,
};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Dataset compiled into the binary, used when no external document is configured.
pub const BUILTIN_DATASET: &str = include_str!("../../data/commands.json");

impl Dataset {
    /// Parse, normalise and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, DatasetError> {
        let doc = raw::parse_document(content)?;
        let dataset = raw::into_dataset(doc)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json_str(BUILTIN_DATASET)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
        let dataset = Self::from_json_str(&content)
            .with_context(|| format!("Invalid dataset: {}", path.display()))?;
        info!(
            path = %path.display(),
            package_managers = dataset.package_managers.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Load `path` when given, otherwise the embedded dataset.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("Using built-in dataset");
                Self::builtin().context("Built-in dataset is invalid")
            }
        }
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.package_managers.is_empty() {
            return Err(DatasetError::NoPackageManagers);
        }

        if self.platforms.is_empty() {
            return Err(DatasetError::empty("platforms", "dataset"));
        }
        if self.platforms.iter().any(|p| p.trim().is_empty()) {
            return Err(DatasetError::empty("platform name", "platforms"));
        }
        check_unique(
            self.platforms.iter().map(String::as_str),
            "platform",
            "platforms",
        )?;

        for (installer, declared) in &self.installers {
            if declared.format.trim().is_empty() {
                return Err(DatasetError::empty(
                    "format",
                    format!("installer '{installer}'"),
                ));
            }
            if !declared.format.contains("{package}") {
                return Err(DatasetError::MissingPackagePlaceholder {
                    installer: installer.clone(),
                });
            }
        }

        for (idx, pm) in self.package_managers.iter().enumerate() {
            if pm.name.trim().is_empty() {
                return Err(DatasetError::empty("name", format!("package manager #{}", idx + 1)));
            }
        }
        check_unique(
            self.package_managers.iter().map(|pm| pm.name.as_str()),
            "package manager",
            "dataset",
        )?;

        for pm in &self.package_managers {
            validate_package_manager(pm)?;
        }

        Ok(())
    }
}

fn validate_package_manager(pm: &PackageManagerEntry) -> Result<(), DatasetError> {
    let context = format!("package manager '{}'", pm.name);

    for fw in &pm.frameworks {
        if fw.name.trim().is_empty() {
            return Err(DatasetError::empty("framework name", context));
        }
        let fw_context = format!("framework '{}' of {}", fw.name, context);
        match &fw.command {
            CommandSpec::Literal(cmd) if cmd.trim().is_empty() => {
                return Err(DatasetError::empty("command", fw_context));
            }
            CommandSpec::Structured {
                installer,
                package_name,
                ..
            } => {
                if installer.trim().is_empty() {
                    return Err(DatasetError::empty("installer", fw_context));
                }
                if package_name.trim().is_empty() {
                    return Err(DatasetError::empty("packageName", fw_context));
                }
            }
            CommandSpec::Literal(_) => {}
        }
    }
    check_unique(pm.frameworks.iter().map(|fw| fw.name.as_str()), "framework", &context)?;

    for group in &pm.library_groups {
        if group.id.trim().is_empty() {
            return Err(DatasetError::empty("library group id", context));
        }
        let group_context = format!("library group '{}' of {}", group.id, context);
        for lib in &group.libraries {
            if lib.name.trim().is_empty() {
                return Err(DatasetError::empty("library name", group_context));
            }
            if lib.command.trim().is_empty() {
                return Err(DatasetError::empty(
                    "command",
                    format!("library '{}' in {}", lib.name, group_context),
                ));
            }
        }
        check_unique(
            group.libraries.iter().map(|lib| lib.name.as_str()),
            "library",
            &group_context,
        )?;
    }
    check_unique(
        pm.library_groups.iter().map(|g| g.id.as_str()),
        "library group",
        &context,
    )?;

    Ok(())
}

fn check_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: &'static str,
    context: &str,
) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DatasetError::duplicate(kind, name, context));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_dataset_is_valid() {
        let dataset = Dataset::builtin().unwrap();
        assert!(!dataset.package_managers.is_empty());
        assert!(dataset.package_manager("npm").is_some());
        assert!(dataset.has_platform("Windows"));
    }

    #[test]
    fn test_duplicate_package_manager_rejected() {
        let err = Dataset::from_json_str(r#"[{"name": "npm"}, {"name": "npm"}]"#).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Duplicate { kind: "package manager", .. }
        ));
    }

    #[test]
    fn test_duplicate_framework_rejected() {
        let err = Dataset::from_json_str(
            r#"[{"name": "npm", "frameworks": [
                {"name": "next", "command": "npx create-next-app"},
                {"name": "next", "command": "npx create-next-app@latest"}
            ]}]"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate framework 'next' in package manager 'npm'"
        );
    }

    #[test]
    fn test_duplicate_library_rejected() {
        let err = Dataset::from_json_str(
            r#"[{"name": "npm", "libraryGroups": {"state": [
                {"name": "redux", "command": "npm install redux"},
                {"name": "redux", "command": "npm install redux@4"}
            ]}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::Duplicate { kind: "library", .. }));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let err = Dataset::from_json_str(r#"[{"name": " "}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyField { .. }));

        let err = Dataset::from_json_str(
            r#"[{"name": "npm", "frameworks": [{"name": "next", "command": ""}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::EmptyField { field: "command", .. }));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = Dataset::from_json_str("[]").unwrap_err();
        assert!(matches!(err, DatasetError::NoPackageManagers));
    }

    #[test]
    fn test_empty_platform_list_rejected() {
        let err = Dataset::from_json_str(
            r#"{"platforms": [], "packageManagers": [{"name": "npm"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Empty platforms in dataset");
    }

    #[test]
    fn test_blank_installer_format_rejected() {
        let err = Dataset::from_json_str(
            r#"{"installers": {"npm": {"format": "  "}}, "packageManagers": [
                {"name": "npm", "frameworks": [{"name": "express", "command": {"installer": "npm", "packageName": "express"}}]}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Empty format in installer 'npm'");
    }

    #[test]
    fn test_installer_format_without_package_rejected() {
        let err = Dataset::from_json_str(
            r#"{"installers": {"npm": {"format": "{installer} add"}}, "packageManagers": [
                {"name": "npm", "frameworks": [{"name": "express", "command": {"installer": "npm", "packageName": "express"}}]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingPackagePlaceholder { ref installer } if installer == "npm"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"platforms": ["Linux"], "packageManagers": [{{"name": "sudo", "frameworks": [{{"name": "x", "command": "apt install x"}}]}}]}}"#
        )
        .unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.platforms, vec!["Linux".to_string()]);
        assert_eq!(dataset.default_platform(), "Linux");
        assert!(dataset.package_manager("sudo").is_some());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dataset::load(&dir.path().join("missing.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_builtin_without_path() {
        let dataset = Dataset::load_or_builtin(None).unwrap();
        assert_eq!(dataset, Dataset::builtin().unwrap());
    }
}
