//! Discovery of the `.medcalc/` directory.
//!
//! A `.medcalc/` directory marks a project that carries its own configuration
//! (and usually its own catalog document). It is found by walking up from the
//! working directory, unless `MEDCALC_DIR` points somewhere explicitly.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the medcalc metadata directory.
pub const MEDCALC_DIR_NAME: &str = ".medcalc";

/// Environment variable that overrides directory discovery.
pub const MEDCALC_DIR_ENV: &str = "MEDCALC_DIR";

/// Walk up the directory tree from `start` looking for a `.medcalc/`
/// directory. `MEDCALC_DIR` is checked first.
///
/// # Examples
///
/// ```no_run
/// use medcalc_config::medcalc_dir::find_medcalc_dir;
/// use std::path::Path;
///
/// if let Some(dir) = find_medcalc_dir(Path::new(".")) {
///     println!("Found medcalc dir at {}", dir.display());
/// }
/// ```
pub fn find_medcalc_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(MEDCALC_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_medcalc_dir_from(start)
}

/// Directory walk without the environment override.
pub fn find_medcalc_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(MEDCALC_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return None,
        }
    }
}

/// Like [`find_medcalc_dir`], but a miss is an error.
pub fn find_medcalc_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_medcalc_dir(start).ok_or(ConfigError::MedcalcDirNotFound)
}

/// Ensure a `.medcalc/` directory exists at (or under) `path`.
///
/// Returns the path to the `.medcalc/` directory.
pub fn ensure_medcalc_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(MEDCALC_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(MEDCALC_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
