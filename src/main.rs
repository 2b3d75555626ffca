use anyhow::Result;
use clap::Parser;
use cmdgen::app::AppState;
use cmdgen::cli::{Cli, Commands};
use cmdgen::clipboard::SystemClipboard;
use cmdgen::commands;
use cmdgen::config::Config;
use cmdgen::dataset::Dataset;
use cmdgen::keybindings::KeybindingCache;
use cmdgen::logging::{LogTarget, init_logging};
use cmdgen::session::Session;
use cmdgen::ui::{self, theme::Theme};
use cmdgen::utils::paths::{ensure_directories_exist, get_log_path};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let log_target = if cli.command.is_none() {
        ensure_directories_exist()?;
        LogTarget::File(get_log_path()?)
    } else {
        LogTarget::Stderr
    };
    init_logging(&log_target, cli.verbose)?;

    // Validate checks its own argument, not the configured dataset.
    if let Some(Commands::Validate { path }) = &cli.command {
        return commands::handle_validate(path);
    }

    let data_path = cli.data.as_deref().or(config.dataset.as_deref());
    let dataset = Dataset::load_or_builtin(data_path)?;

    match cli.command {
        Some(Commands::List) => {
            commands::handle_list(&dataset);
        }
        Some(Commands::Show {
            pm,
            framework,
            libs,
            copy,
        }) => {
            commands::handle_show(dataset, &pm, framework.as_deref(), &libs, copy)?;
        }
        Some(Commands::Pick { copy }) => {
            commands::handle_pick(dataset, copy)?;
        }
        Some(Commands::Validate { .. }) => {}
        None => {
            let theme = Theme::from_config(&config);
            let keybindings = KeybindingCache::from_config(&config.keybindings);
            let state = AppState::new(
                Session::new(dataset),
                Box::new(SystemClipboard::new()),
                theme,
                keybindings,
                config.timeoutlen,
            );

            ui::run_tui(state)?;
        }
    }

    Ok(())
}
