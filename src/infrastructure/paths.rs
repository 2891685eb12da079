//! Path helpers for the data directory and user-supplied file paths.

use std::env;
use std::path::PathBuf;

/// Overrides the data directory entirely when set.
pub const DATA_DIR_ENV: &str = "GREEN_ATLAS_DATA_DIR";

/// Returns the data directory for span logs.
///
/// Resolution order:
///
/// 1. `$GREEN_ATLAS_DATA_DIR`
/// 2. `$XDG_DATA_HOME/green-atlas`
/// 3. `$HOME/.local/share/green-atlas`
/// 4. `<temp dir>/green-atlas`
///
/// Empty variables are treated as unset. The directory is not created here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|key| env::var(key).ok())
}

fn resolve_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(dir) = var(DATA_DIR_ENV) {
        return PathBuf::from(expand_tilde(&dir));
    }
    if let Some(xdg) = var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("green-atlas");
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("green-atlas");
    }
    env::temp_dir().join("green-atlas")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use green_atlas::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("themes/mine.toml"), "themes/mine.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_with_home(path, env::var("HOME").ok().as_deref())
}

fn expand_with_home(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
