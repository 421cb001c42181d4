//! Runtime config file discovery, reading and writing.
//!
//! Files may be JSON5 (comments, unquoted keys, trailing commas) or plain
//! JSON; both are read with the JSON5 parser. Files are written back as
//! pretty-printed JSON.
//!
//! # File Locations
//!
//! Searched in order, first match wins:
//!
//! 1. Working directory: `./plaudit.json5`, `./plaudit.json`
//! 2. User config directory: `~/.config/plaudit/config.json5`,
//!    `~/.config/plaudit/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Config file names looked up in the working directory, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["plaudit.json5", "plaudit.json"];

/// Directory under the platform config dir holding the user config.
const USER_CONFIG_DIR: &str = "plaudit";

/// Config file names looked up in the user config directory.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the runtime config file in the default locations.
///
/// # Examples
///
/// ```no_run
/// use plaudit_config::persistence::find_config_file;
///
/// match find_config_file() {
///     Some(path) => println!("using {}", path.display()),
///     None => println!("using built-in defaults"),
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR));
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds the runtime config file under explicit search roots.
///
/// `local_dir` is searched for `plaudit.json5`/`plaudit.json`, then
/// `user_dir` (when given) for `config.json5`/`config.json`.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).find(|path| path.is_file())
}

/// Returns the user configuration directory (`~/.config/plaudit` on Linux).
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config
/// directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the path a new user config is written to.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config
/// directory cannot be determined.
pub fn default_user_config_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(USER_FILE_NAMES[0]))
}

/// Reads and parses a JSON5 or JSON config file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if its content does not parse into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes a config as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::WriteFile`] if a directory or the file cannot be
/// written and [`ConfigError::Json`] if `config` cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}
