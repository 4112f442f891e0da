use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

const LOG_ENV_VAR: &str = "CURATOR_LOG";

pub fn default_log_path() -> Option<PathBuf> {
    let mut path = dirs::data_local_dir()?;
    path.push("album-curator");
    path.push("curator.log");
    Some(path)
}

/// Configured log file with `~` expanded, else the default location.
pub fn resolve_log_path(configured: Option<&str>) -> Option<PathBuf> {
    configured
        .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned()))
        .or_else(default_log_path)
}

/// Logs go to a file because the terminal belongs to the UI.
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        // Parse environment variables after configuring all default option(s).
        .parse_env(LOG_ENV_VAR)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Asks on the terminal; anything but an explicit yes declines.
pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

pub fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
