//! On-disk shapes of the dataset document.
//!
//! Older documents used `pm`/`framework`/`cmd`/`lib` field names, keyed
//! library groups without titles, and per-framework `libs` blocks. All of
//! them are accepted here and folded into the canonical model exactly once.

use super::error::DatasetError;
use super::model::{
    CommandSpec, Dataset, FrameworkEntry, InstallerFormat, LibraryEntry, LibraryGroup,
    PackageManagerEntry, default_platforms,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub installers: BTreeMap<String, RawInstaller>,
    #[serde(alias = "data")]
    pub package_managers: Vec<RawPackageManager>,
}

#[derive(Debug, Deserialize)]
pub struct RawInstaller {
    pub format: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackageManager {
    #[serde(alias = "pm")]
    pub name: String,
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default, alias = "framework")]
    pub frameworks: Vec<RawFramework>,
    #[serde(default, alias = "libs")]
    pub library_groups: Option<RawLibraryGroups>,
}

#[derive(Debug, Deserialize)]
pub struct RawFramework {
    pub name: String,
    #[serde(alias = "cmd")]
    pub command: RawCommand,
    #[serde(default)]
    pub libs: Option<RawLibraryGroups>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawCommand {
    Literal(String),
    Structured {
        installer: String,
        #[serde(rename = "packageName", alias = "package")]
        package_name: String,
        #[serde(default)]
        versions: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawLibraryGroups {
    List(Vec<RawLibraryGroup>),
    Keyed(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
pub struct RawLibraryGroup {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "lib")]
    pub libraries: Vec<RawLibrary>,
}

#[derive(Debug, Deserialize)]
pub struct RawLibrary {
    pub name: String,
    #[serde(alias = "cmd")]
    pub command: String,
}

/// Parse a document that is either a bare array of package managers or an
/// object with `packageManagers` and optional `platforms`/`installers`.
pub fn parse_document(content: &str) -> Result<RawDocument, DatasetError> {
    let value: Value = serde_json::from_str(content)?;
    let doc = match value {
        Value::Array(_) => RawDocument {
            platforms: None,
            installers: BTreeMap::new(),
            package_managers: serde_json::from_value(value)?,
        },
        other => serde_json::from_value(other)?,
    };
    Ok(doc)
}

pub fn into_dataset(doc: RawDocument) -> Result<Dataset, DatasetError> {
    let package_managers = doc
        .package_managers
        .into_iter()
        .map(into_package_manager)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset {
        platforms: doc.platforms.unwrap_or_else(default_platforms),
        installers: doc
            .installers
            .into_iter()
            .map(|(name, raw)| (name, InstallerFormat { format: raw.format }))
            .collect(),
        package_managers,
    })
}

fn into_package_manager(raw: RawPackageManager) -> Result<PackageManagerEntry, DatasetError> {
    let mut library_groups = match raw.library_groups {
        Some(groups) => into_library_groups(groups)?,
        None => Vec::new(),
    };

    let mut frameworks = Vec::with_capacity(raw.frameworks.len());
    for fw in raw.frameworks {
        if let Some(libs) = fw.libs {
            for group in into_library_groups(libs)? {
                merge_group(&mut library_groups, group);
            }
        }
        frameworks.push(FrameworkEntry {
            name: fw.name,
            command: into_command(fw.command),
        });
    }

    Ok(PackageManagerEntry {
        name: raw.name,
        actions: raw.actions,
        options: raw.options,
        frameworks,
        library_groups,
    })
}

fn into_command(raw: RawCommand) -> CommandSpec {
    match raw {
        RawCommand::Literal(cmd) => CommandSpec::Literal(cmd),
        RawCommand::Structured {
            installer,
            package_name,
            versions,
        } => CommandSpec::Structured {
            installer,
            package_name,
            versions,
        },
    }
}

fn into_library_groups(raw: RawLibraryGroups) -> Result<Vec<LibraryGroup>, DatasetError> {
    match raw {
        RawLibraryGroups::List(groups) => Ok(groups
            .into_iter()
            .map(|group| LibraryGroup {
                title: group.title.unwrap_or_else(|| default_group_title(&group.id)),
                id: group.id,
                libraries: group.libraries.into_iter().map(into_library).collect(),
            })
            .collect()),
        RawLibraryGroups::Keyed(map) => map
            .into_iter()
            .map(|(id, value)| {
                let libraries: Vec<RawLibrary> = serde_json::from_value(value)?;
                Ok(LibraryGroup {
                    title: default_group_title(&id),
                    id,
                    libraries: libraries.into_iter().map(into_library).collect(),
                })
            })
            .collect(),
    }
}

fn into_library(raw: RawLibrary) -> LibraryEntry {
    LibraryEntry {
        name: raw.name,
        command: raw.command,
    }
}

/// First occurrence of a group id wins; later libraries with new names are appended.
fn merge_group(groups: &mut Vec<LibraryGroup>, incoming: LibraryGroup) {
    match groups.iter_mut().find(|g| g.id == incoming.id) {
        Some(existing) => {
            for lib in incoming.libraries {
                if existing.library(&lib.name).is_none() {
                    existing.libraries.push(lib);
                }
            }
        }
        None => groups.push(incoming),
    }
}

pub fn default_group_title(id: &str) -> String {
    match id {
        "ui" => "UI Design",
        "state" => "State Management",
        "routing" => "Routing",
        "form" => "Forms",
        "fetch" => "Data Fetching",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_array_document() {
        let doc = parse_document(r#"[{"name": "npm", "frameworks": []}]"#).unwrap();
        assert!(doc.platforms.is_none());
        assert_eq!(doc.package_managers.len(), 1);
        assert_eq!(doc.package_managers[0].name, "npm");
    }

    #[test]
    fn test_object_document() {
        let doc = parse_document(
            r#"{
                "platforms": ["Windows", "Linux"],
                "installers": {"npx": {"format": "{installer} {package}"}},
                "packageManagers": [{"name": "npm"}]
            }"#,
        )
        .unwrap();
        assert_eq!(doc.platforms, Some(vec!["Windows".to_string(), "Linux".to_string()]));
        assert_eq!(doc.installers["npx"].format, "{installer} {package}");
    }

    #[test]
    fn test_legacy_field_names() {
        let doc = parse_document(
            r#"[{"pm": "npm", "framework": [{"name": "next", "cmd": "npx create-next-app"}]}]"#,
        )
        .unwrap();
        let dataset = into_dataset(doc).unwrap();
        let pm = &dataset.package_managers[0];
        assert_eq!(pm.name, "npm");
        assert_eq!(
            pm.frameworks[0].command,
            CommandSpec::literal("npx create-next-app")
        );
    }

    #[test]
    fn test_structured_command() {
        let doc = parse_document(
            r#"[{"name": "pip", "frameworks": [
                {"name": "django", "command": {"installer": "pip", "packageName": "django", "versions": ["5.0", "4.2"]}}
            ]}]"#,
        )
        .unwrap();
        let dataset = into_dataset(doc).unwrap();
        assert_eq!(
            dataset.package_managers[0].frameworks[0].command,
            CommandSpec::Structured {
                installer: "pip".to_string(),
                package_name: "django".to_string(),
                versions: vec!["5.0".to_string(), "4.2".to_string()],
            }
        );
    }

    #[test]
    fn test_keyed_and_listed_groups_normalize_alike() {
        let keyed = parse_document(
            r#"[{"name": "npm", "libraryGroups": {
                "state": [{"name": "redux", "cmd": "npm install redux"}],
                "ui": [{"name": "mui", "cmd": "npm install @mui/material"}]
            }}]"#,
        )
        .unwrap();
        let listed = parse_document(
            r#"[{"name": "npm", "libraryGroups": [
                {"id": "state", "title": "State Management", "libraries": [{"name": "redux", "command": "npm install redux"}]},
                {"id": "ui", "title": "UI Design", "libraries": [{"name": "mui", "command": "npm install @mui/material"}]}
            ]}]"#,
        )
        .unwrap();

        let keyed = into_dataset(keyed).unwrap();
        let listed = into_dataset(listed).unwrap();
        assert_eq!(keyed, listed);
        assert_eq!(keyed.package_managers[0].library_groups[0].id, "state");
    }

    #[test]
    fn test_framework_libs_are_hoisted_and_merged() {
        let doc = parse_document(
            r#"[{"pm": "npm", "framework": [
                {"name": "react", "cmd": "npx create-react-app", "libs": {
                    "state": [{"name": "redux", "cmd": "npm install redux"}]
                }},
                {"name": "next", "cmd": "npx create-next-app", "libs": {
                    "state": [
                        {"name": "redux", "cmd": "npm install @reduxjs/toolkit"},
                        {"name": "zustand", "cmd": "npm install zustand"}
                    ],
                    "fetch": [{"name": "swr", "cmd": "npm install swr"}]
                }}
            ]}]"#,
        )
        .unwrap();
        let dataset = into_dataset(doc).unwrap();
        let groups = &dataset.package_managers[0].library_groups;

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "state");
        let names: Vec<_> = groups[0].libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["redux", "zustand"]);
        assert_eq!(groups[0].libraries[0].command, "npm install redux");
        assert_eq!(groups[1].title, "Data Fetching");
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = parse_document(r#"[{"frameworks": []}]"#);
        assert!(result.is_err());

        let result = parse_document(r#"[{"name": "npm", "frameworks": [{"name": "next"}]}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_group_title() {
        assert_eq!(default_group_title("routing"), "Routing");
        assert_eq!(default_group_title("testing"), "testing");
    }
}
