//! Non-interactive subcommands. Each handler builds its output as a string
//! so the formatting can be tested without a terminal.

use crate::clipboard::SystemClipboard;
use crate::copy_state::CopyOutcome;
use crate::dataset::Dataset;
use crate::session::Session;
use anyhow::{Context, Result, anyhow, bail};
use dialoguer::{Select, theme::ColorfulTheme};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub fn render_list(dataset: &Dataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Platforms: {}", dataset.platforms.join(", "));
    for pm in &dataset.package_managers {
        let _ = writeln!(out, "\n{}", pm.name);
        if !pm.frameworks.is_empty() {
            let names: Vec<String> = pm
                .frameworks
                .iter()
                .map(|fw| match fw.command.versions() {
                    [] => fw.name.clone(),
                    versions => format!("{} [{}]", fw.name, versions.join(", ")),
                })
                .collect();
            let _ = writeln!(out, "  Frameworks: {}", names.join(", "));
        }
        for group in &pm.library_groups {
            let names: Vec<&str> = group.libraries.iter().map(|lib| lib.name.as_str()).collect();
            let _ = writeln!(out, "  {} ({}): {}", group.title, group.id, names.join(", "));
        }
    }
    out
}

/// Split a `group=name` library argument.
pub fn parse_lib_arg(arg: &str) -> Result<(String, String)> {
    let (group, name) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Library choice must look like group=name: '{arg}'"))?;
    let (group, name) = (group.trim(), name.trim());
    if group.is_empty() || name.is_empty() {
        bail!("Library choice must look like group=name: '{arg}'");
    }
    Ok((group.to_string(), name.to_string()))
}

/// Apply a command-line selection to a fresh session, rejecting unknown names.
pub fn build_session(
    dataset: Dataset,
    pm: &str,
    framework: Option<&str>,
    libs: &[String],
) -> Result<Session> {
    let mut session = Session::new(dataset);
    if session.dataset().package_manager(pm).is_none() {
        bail!("Unknown package manager '{pm}'");
    }
    session.select_package_manager(pm);

    if let Some(fw) = framework {
        let known = session
            .package_manager()
            .is_some_and(|entry| entry.framework(fw).is_some());
        if !known {
            bail!("Unknown framework '{fw}' for {pm}");
        }
        session.select_framework(fw);
    }

    for arg in libs {
        let (group, name) = parse_lib_arg(arg)?;
        let group_entry = session
            .package_manager()
            .and_then(|entry| entry.library_group(&group))
            .with_context(|| format!("Unknown library group '{group}' for {pm}"))?;
        if group_entry.library(&name).is_none() {
            bail!("Unknown library '{name}' in group '{group}'");
        }
        session.select_library(&group, &name);
    }

    Ok(session)
}

/// One line per visible command slot.
pub fn render_slots(session: &Session) -> String {
    let mut out = String::new();
    if let Some(fw) = &session.selection().framework {
        if !session.framework_command().is_empty() {
            let _ = writeln!(out, "{fw}: {}", session.framework_command());
        }
    }
    for section in session.library_sections() {
        if let (Some(lib), Some(slot)) = (section.selected, section.slot()) {
            let _ = writeln!(out, "{} ({}): {}", section.group.title, lib.name, slot.command);
        }
    }
    out
}

pub fn validation_summary(dataset: &Dataset) -> String {
    let frameworks: usize = dataset
        .package_managers
        .iter()
        .map(|pm| pm.frameworks.len())
        .sum();
    let groups: usize = dataset
        .package_managers
        .iter()
        .map(|pm| pm.library_groups.len())
        .sum();
    format!(
        "OK: {} platform(s), {} package manager(s), {} framework(s), {} library group(s)",
        dataset.platforms.len(),
        dataset.package_managers.len(),
        frameworks,
        groups
    )
}

pub fn handle_list(dataset: &Dataset) {
    print!("{}", render_list(dataset));
}

pub fn handle_show(
    dataset: Dataset,
    pm: &str,
    framework: Option<&str>,
    libs: &[String],
    copy: bool,
) -> Result<()> {
    let mut session = build_session(dataset, pm, framework, libs)?;
    print!("{}", render_slots(&session));
    if copy {
        copy_framework_command(&mut session)?;
    }
    Ok(())
}

pub fn handle_validate(path: &Path) -> Result<()> {
    let dataset = Dataset::load(path)?;
    println!("{}", validation_summary(&dataset));
    Ok(())
}

pub fn handle_pick(dataset: Dataset, copy: bool) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut session = Session::new(dataset);

    let managers: Vec<String> = session
        .dataset()
        .package_managers
        .iter()
        .map(|pm| pm.name.clone())
        .collect();
    let pm_idx = Select::with_theme(&theme)
        .with_prompt("Package manager")
        .items(&managers)
        .default(0)
        .interact()
        .context("Failed to read package manager choice")?;
    session.select_package_manager(&managers[pm_idx]);

    let frameworks: Vec<String> = session
        .package_manager()
        .map(|pm| pm.frameworks.iter().map(|fw| fw.name.clone()).collect())
        .unwrap_or_default();
    if frameworks.is_empty() {
        println!("{} has no frameworks", managers[pm_idx]);
        return Ok(());
    }
    let fw_idx = Select::with_theme(&theme)
        .with_prompt("Framework")
        .items(&frameworks)
        .default(0)
        .interact()
        .context("Failed to read framework choice")?;
    session.select_framework(&frameworks[fw_idx]);

    info!(
        package_manager = %managers[pm_idx],
        framework = %frameworks[fw_idx],
        "Picked"
    );
    println!("{}", session.framework_command());
    if copy {
        copy_framework_command(&mut session)?;
    }
    Ok(())
}

fn copy_framework_command(session: &mut Session) -> Result<()> {
    let mut clipboard = SystemClipboard::new();
    match session.copy_framework(&mut clipboard, Instant::now()) {
        CopyOutcome::Copied => println!("✓ Copied to clipboard"),
        CopyOutcome::Skipped => println!("Nothing to copy"),
        CopyOutcome::Failed => bail!("Failed to copy command to clipboard"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builtin() -> Dataset {
        Dataset::builtin().unwrap()
    }

    #[test]
    fn test_parse_lib_arg() {
        assert_eq!(
            parse_lib_arg("state=Zustand").unwrap(),
            ("state".to_string(), "Zustand".to_string())
        );
        assert_eq!(
            parse_lib_arg(" ui = Chakra UI ").unwrap(),
            ("ui".to_string(), "Chakra UI".to_string())
        );
        assert!(parse_lib_arg("state").is_err());
        assert!(parse_lib_arg("=Zustand").is_err());
        assert!(parse_lib_arg("state=").is_err());
    }

    #[test]
    fn test_show_defaults_to_first_entries() {
        let session = build_session(builtin(), "npm", None, &[]).unwrap();
        let out = render_slots(&session);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Next.js: npx create-next-app@latest"));
        assert_eq!(
            lines.next(),
            Some("UI Design (MUI): npm install @mui/material @emotion/react @emotion/styled")
        );
    }

    #[test]
    fn test_show_with_explicit_choices() {
        let libs = vec!["state=Zustand".to_string()];
        let session = build_session(builtin(), "npm", Some("Vue"), &libs).unwrap();
        let out = render_slots(&session);
        assert!(out.contains("Vue: npm create vue@latest\n"));
        assert!(out.contains("State Management (Zustand): npm install zustand\n"));
    }

    #[test]
    fn test_show_rejects_unknown_names() {
        assert!(build_session(builtin(), "brew", None, &[]).is_err());
        assert!(build_session(builtin(), "npm", Some("Rails"), &[]).is_err());
        let libs = vec!["state=MobX".to_string()];
        assert!(build_session(builtin(), "npm", None, &libs).is_err());
        let libs = vec!["css=Tailwind".to_string()];
        assert!(build_session(builtin(), "npm", None, &libs).is_err());
    }

    #[test]
    fn test_render_list_mentions_every_manager() {
        let dataset = builtin();
        let out = render_list(&dataset);
        assert!(out.starts_with("Platforms: Windows\n"));
        for pm in &dataset.package_managers {
            assert!(out.contains(&format!("\n{}\n", pm.name)));
        }
        assert!(out.contains("  State Management (state): Redux Toolkit, Zustand, Jotai\n"));
    }

    #[test]
    fn test_render_list_shows_framework_versions() {
        let out = render_list(&builtin());
        assert!(out.contains("Astro [4, 5], Express\n"));
        assert!(out.contains("  Frameworks: Django [5.1, 4.2], Flask, FastAPI\n"));
        assert!(out.contains("  Frameworks: FastAPI, Django\n"));
    }

    #[test]
    fn test_validation_summary() {
        let dataset = Dataset::from_json_str(
            r#"[{"name": "npm", "frameworks": [{"name": "next", "command": "npx create-next-app"}]}]"#,
        )
        .unwrap();
        assert_eq!(
            validation_summary(&dataset),
            "OK: 1 platform(s), 1 package manager(s), 1 framework(s), 0 library group(s)"
        );
    }
}
