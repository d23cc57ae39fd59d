//! Sandbox path helpers.
//!
//! Zellij mounts the plugin's private data folder at `/data` and the host
//! filesystem (rooted at the working directory Zellij was started from) at
//! `/host`.

use std::path::PathBuf;

/// File name of the OTLP trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "journalscout-otlp.json";

/// The plugin's private data directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps a `~`-relative path onto the `/host` mount.
///
/// ```
/// use journalscout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
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
    fn trace_file_lives_in_data_dir() {
        assert_eq!(trace_file(), PathBuf::from("/data/journalscout-otlp.json"));
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
    }
}
