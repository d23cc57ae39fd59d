//! Journalscout: a Zellij plugin for searching academic journal catalogues.
//!
//! Journalscout provides:
//! - Free-text search over a remote journal catalogue, debounced and cached
//! - Facet filters (search fields, publishers, indexing databases, quartiles,
//!   CiteScore and Impact Factor ranges) edited in a panel or as chips
//! - A paginated table view with row selection and a card view that reveals
//!   results ten at a time
//! - Plain-text export of one or many records to the system clipboard

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, focus, filter panel              │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search        │   │ Results       │
//! │ (ui/)         │   │ (search/)     │   │ (results/)    │
//! │ - Rendering   │   │ - Debounce    │   │ - Dedup       │
//! │ - Theming     │   │ - Cache       │   │ - Pagination  │
//! │ - Components  │   │ - HTTP client │   │ - Export      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Filter model (filter/), Domain (domain/),          │
//! │  Infrastructure (infrastructure/)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Journal record and error types
//! - [`filter`]: Filter criteria and the editor that mutates them
//! - [`search`]: Request normalization, cache, dispatcher, HTTP client
//! - [`results`]: Result store, selection, card reveal, export
//! - [`infrastructure`]: Sandbox paths and clipboard delivery
//! - [`ui`]: Terminal rendering with theme support
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/journalscout.wasm" {
//!         base_url "https://journals.example.org"
//!         api_key "..."
//!         debounce_ms "400"
//!         theme "catppuccin-latte"
//!         clipboard "command"
//!         copy_command "wl-copy"
//!     }
//! }
//! ```
//!
//! # Search Flow
//!
//! 1. A query or filter edit commits a search. The dispatcher normalizes it
//!    into a [`search::SearchRequest`] and derives its canonical cache key.
//! 2. Blank queries are skipped. Everything else waits out the debounce
//!    window, which restarts on every edit.
//! 3. When the timer fires, a cached key is answered from memory, a key
//!    already on the wire joins that request, and anything else becomes a
//!    POST handed to the host.
//! 4. The response is validated, cached, de-duplicated, and shown if it
//!    belongs to the most recently issued request.
//!
//! # Example
//!
//! ```rust
//! use journalscout::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "ecology".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::StartTimer { .. }]));
//! # Ok::<(), journalscout::ScoutError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod results;
pub mod search;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{Journal, Result, ScoutError};
pub use ui::Theme;

use infrastructure::{expand_tilde, ClipboardConfig, ClipboardMethod};
use search::{Dispatcher, SearchCache, SearchClient};
use std::collections::BTreeMap;
use std::time::Duration;

/// Search service used when `base_url` is not configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Debounce window used when `debounce_ms` is not configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/journalscout.wasm" {
///     base_url "http://localhost:5000"
///     api_key "secret"
///     api_version "2"
///     require_api_key "true"
///     debounce_ms "500"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/journalscout/theme.toml"
///     trace_level "debug"
///     clipboard "osc52"
///     copy_command "wl-copy"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the search service; `/api/journals/search` is appended.
    pub base_url: String,

    /// Sent as `Authorization: Bearer <key>` when present.
    pub api_key: Option<String>,

    /// Sent as `X-API-Version` when present.
    pub api_version: Option<String>,

    /// Makes a missing `api_key` a configuration error.
    pub require_api_key: bool,

    /// Quiet period after the last edit before a search is sent.
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans. Default: `"info"`
    pub trace_level: Option<String>,

    pub clipboard: ClipboardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_version: None,
            require_api_key: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            clipboard: ClipboardConfig::default(),
        }
    }
}

/// Non-empty, trimmed value for `key`.
fn non_empty(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(ScoutError::Config(format!("{key} must be true or false, got {other:?}"))),
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing keys take their defaults. Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::Config` when a value does not parse, or when
    /// `require_api_key` is set and no `api_key` is given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use journalscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "https://api.example.org".to_string());
    /// map.insert("debounce_ms".to_string(), "250".to_string());
    ///
    /// let config = Config::from_zellij(&map)?;
    /// assert_eq!(config.base_url, "https://api.example.org");
    /// assert_eq!(config.debounce_ms, 250);
    /// # Ok::<(), journalscout::ScoutError>(())
    /// ```
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Result<Self> {
        let debounce_ms = match non_empty(config, "debounce_ms") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ScoutError::Config(format!("debounce_ms must be a whole number of milliseconds: {e}"))
            })?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        let require_api_key = match non_empty(config, "require_api_key") {
            Some(raw) => parse_bool("require_api_key", &raw)?,
            None => false,
        };

        let api_key = non_empty(config, "api_key");
        if require_api_key && api_key.is_none() {
            return Err(ScoutError::Config(
                "api_key is required but was not configured".into(),
            ));
        }

        let clipboard = ClipboardConfig {
            method: match non_empty(config, "clipboard") {
                Some(raw) => ClipboardMethod::parse(&raw)?,
                None => ClipboardMethod::default(),
            },
            copy_command: non_empty(config, "copy_command"),
        };

        Ok(Self {
            base_url: non_empty(config, "base_url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            api_version: non_empty(config, "api_version"),
            require_api_key,
            debounce_ms,
            theme_name: non_empty(config, "theme"),
            theme_file: non_empty(config, "theme_file"),
            trace_level: non_empty(config, "trace_level"),
            clipboard,
        })
    }
}

fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        match Theme::from_file(expand_tilde(theme_file)) {
            Ok(theme) => return theme,
            Err(e) => {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file");
            }
        }
    }
    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds the initial application state: theme, search client, dispatcher
/// with an empty cache, and an empty result store.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, debounce_ms = config.debounce_ms, "initializing journalscout");

    let client = SearchClient::new(&config.base_url, config.api_key.clone(), config.api_version.clone());
    let dispatcher = Dispatcher::new(SearchCache::new(), Duration::from_millis(config.debounce_ms));

    AppState::new(client, dispatcher, config.clipboard.clone(), resolve_theme(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()).unwrap(), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "https://api.example.org"),
            ("api_key", "k"),
            ("api_version", "3"),
            ("require_api_key", "true"),
            ("debounce_ms", "120"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
            ("clipboard", "command"),
            ("copy_command", "pbcopy"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.api_version.as_deref(), Some("3"));
        assert!(config.require_api_key);
        assert_eq!(config.debounce_ms, 120);
        assert_eq!(config.clipboard.method, ClipboardMethod::Command);
        assert_eq!(config.clipboard.copy_command.as_deref(), Some("pbcopy"));
    }

    #[test]
    fn required_key_must_be_present() {
        let err = Config::from_zellij(&map(&[("require_api_key", "true"), ("api_key", "  ")])).unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Config::from_zellij(&map(&[("debounce_ms", "soon")])).is_err());
        assert!(Config::from_zellij(&map(&[("require_api_key", "maybe")])).is_err());
        assert!(Config::from_zellij(&map(&[("clipboard", "xclip")])).is_err());
    }

    #[test]
    fn unreadable_theme_file_falls_back_to_named_theme() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".into()),
            theme_name: Some("catppuccin-latte".into()),
            ..Config::default()
        };
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(resolve_theme(&config).colors.border, latte.colors.border);
    }
}
