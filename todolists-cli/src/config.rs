//! `.env` loading
//!
//! Variables are read from `./.env` first, then `~/.todolists/.env`.
//! dotenvy never overwrites a variable that is already set, so the real
//! environment wins over both files and the current directory wins over
//! the home directory.

use std::path::PathBuf;

/// Outcome of [`load_dotenv`], logged once tracing is up.
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, dotenvy::Error)>,
}

/// Directory holding user-level configuration (`~/.todolists`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todolists"))
}

/// Load `.env` files.
///
/// Runs before tracing is initialized, so nothing is logged here.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    if let Ok(path) = dotenvy::dotenv() {
        report.loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => report.loaded.push(env_file),
                Err(e) => report.failed.push((env_file, e)),
            }
        }
    }

    report
}

impl DotenvReport {
    pub fn log(&self) {
        for path in &self.loaded {
            tracing::debug!("Environment loaded from {}", path.display());
        }
        for (path, err) in &self.failed {
            tracing::warn!("Failed to load {}: {}", path.display(), err);
        }
        if self.loaded.is_empty() && self.failed.is_empty() {
            tracing::debug!("No .env files found (current dir or ~/.todolists)");
        }
    }
}
