//! Sandbox path handling.

use std::path::PathBuf;

/// Returns the directory holding dexplorer's trace output.
///
/// In Zellij's sandbox `/host` points at the cwd of the last focused
/// terminal (usually the home directory), so this resolves to
/// `~/.local/share/zellij/dexplorer` on the host.
///
/// # Examples
///
/// ```
/// use dexplorer::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/dexplorer"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("dexplorer")
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// Used for the `theme_file` option, which users write as a host path.
///
/// # Examples
///
/// ```
/// use dexplorer::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dex.toml"), "/host/themes/dex.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_inside_path_is_untouched() {
        assert_eq!(expand_tilde("/themes/~/dex.toml"), "/themes/~/dex.toml");
        assert_eq!(expand_tilde("~user/dex.toml"), "~user/dex.toml");
    }

    #[test]
    fn data_dir_lives_under_host() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("dexplorer"));
    }
}
