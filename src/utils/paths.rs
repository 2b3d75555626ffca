use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub fn get_cmdgen_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".cmdgen"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let cmdgen_dir = get_cmdgen_dir()?;
    Ok(cmdgen_dir.join("config.toml"))
}

pub fn get_log_path() -> Result<PathBuf> {
    let cmdgen_dir = get_cmdgen_dir()?;
    Ok(cmdgen_dir.join("cmdgen.log"))
}

pub fn ensure_directories_exist() -> Result<()> {
    let cmdgen_dir = get_cmdgen_dir()?;

    if !cmdgen_dir.exists() {
        fs::create_dir_all(&cmdgen_dir)?;
    }

    Ok(())
}
