//! Turns dataset entries into the shell commands shown to the user.
//!
//! Everything here is a pure function of its inputs.

use crate::dataset::{CommandSpec, Dataset, LibraryEntry, PackageManagerEntry};

/// Package manager whose literal commands are run through `sudo`.
pub const SUDO_MANAGER: &str = "sudo";

/// Installers that run a package without installing it.
const DIRECT_EXECUTE_INSTALLERS: &[&str] = &["npx", "pnpx", "bunx", "uvx", "pnpm dlx", "yarn dlx"];

/// Single-language installers whose verb is always `install`.
const FIXED_VERB_INSTALLERS: &[&str] = &["pip", "pip3", "pipx", "gem", "cargo", "go"];

/// Formatting rule picked for a structured command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerRule<'a> {
    /// Template declared in the dataset's `installers` table.
    Template(&'a str),
    /// `{installer} {package}`
    DirectExecute,
    /// `{installer} install {package}`
    FixedVerb,
    /// `{installer} {actions.install} {package}`
    ManagerAction,
}

/// Resolve the command for `fw_name` under `pm_name`, or `""` when either is unknown.
pub fn resolve_framework_command(dataset: &Dataset, pm_name: &str, fw_name: &str) -> String {
    let Some(pm) = dataset.package_manager(pm_name) else {
        return String::new();
    };
    let Some(fw) = pm.framework(fw_name) else {
        return String::new();
    };

    match &fw.command {
        CommandSpec::Literal(cmd) => {
            if pm.name == SUDO_MANAGER {
                format!("sudo {cmd}")
            } else {
                cmd.clone()
            }
        }
        CommandSpec::Structured {
            installer,
            package_name,
            ..
        } => format_structured(dataset, pm, installer, package_name),
    }
}

pub fn resolve_library_command(entry: &LibraryEntry) -> String {
    entry.command.clone()
}

pub fn format_structured(
    dataset: &Dataset,
    pm: &PackageManagerEntry,
    installer: &str,
    package_name: &str,
) -> String {
    match select_rule(dataset, installer, package_name) {
        InstallerRule::Template(template) => collapse_whitespace(
            &template
                .replace("{installer}", installer)
                .replace("{action}", pm.install_action())
                .replace("{package}", package_name),
        ),
        InstallerRule::DirectExecute => {
            format!("{} {package_name}", collapse_whitespace(installer))
        }
        InstallerRule::FixedVerb => format!("{installer} install {package_name}"),
        InstallerRule::ManagerAction => collapse_whitespace(&format!(
            "{installer} {} {package_name}",
            pm.install_action()
        )),
    }
}

/// Dataset templates win; otherwise the built-in rules apply in fixed order.
pub fn select_rule<'a>(dataset: &'a Dataset, installer: &str, package_name: &str) -> InstallerRule<'a> {
    if let Some(declared) = dataset.installer_format(installer) {
        return InstallerRule::Template(&declared.format);
    }
    builtin_rule(installer, package_name)
}

pub fn builtin_rule(installer: &str, package_name: &str) -> InstallerRule<'static> {
    if is_direct_execute(installer) || is_scaffold(package_name) {
        InstallerRule::DirectExecute
    } else if FIXED_VERB_INSTALLERS.contains(&installer) {
        InstallerRule::FixedVerb
    } else {
        InstallerRule::ManagerAction
    }
}

fn is_direct_execute(installer: &str) -> bool {
    let normalized = collapse_whitespace(installer);
    DIRECT_EXECUTE_INSTALLERS.contains(&normalized.as_str())
}

/// `create foo`, `create-foo` and `@scope/create-foo` all scaffold a project.
fn is_scaffold(package_name: &str) -> bool {
    let Some(first) = package_name.split_whitespace().next() else {
        return false;
    };
    first == "create" || first.starts_with("create-") || first.contains("/create-")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
