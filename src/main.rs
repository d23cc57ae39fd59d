//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the Journalscout library and
//! the Zellij plugin system. It translates host events into library
//! [`Event`]s and carries out the [`Action`]s the library returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Timer, `WebRequestResult`,
//!    `RunCommandResult`, `PermissionRequestResult`
//! 3. **Update**: Map events, delegate to `handle_event`, execute actions
//! 4. **Render**: Flush any pending OSC 52 sequence, then draw the frame
//!
//! # Event Mapping
//!
//! - `Key` → focus-dependent input event
//! - `Timer` → `Event::TimerElapsed`
//! - `WebRequestResult` → `Event::SearchResponse`
//! - `RunCommandResult` (clipboard context) → `Event::ClipboardCommandFinished`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Tab` / `Shift+Tab`: Cycle focus
//! - `Ctrl+f`: Show or hide the filter panel
//! - `Ctrl+c`: Close plugin
//!
//! Search bar:
//! - Characters: Type into the query
//! - `Enter`: Search
//! - `Esc`: Clear the query (on an empty query, jump to results)
//!
//! Filter panel:
//! - `j`/`k`: Move, `Space`: Toggle, `h`/`l`: Adjust a bound, `H`/`L`: Adjust
//!   by a coarse step, `x`: Clear all filters, `f`/`Esc`: Hide
//!
//! Filter chips:
//! - `h`/`l`: Move, `d`/`Backspace`: Remove, `x`: Clear all
//!
//! Results:
//! - `j`/`k`: Move, `n`/`p`: Page, `g`: Top, `Space`: Select row,
//!   `a`: Select page, `y`/`Enter`: Copy record, `Y`: Copy selection,
//!   `v`: Table or cards, `s`: Sort field, `o`: Sort order,
//!   `/`: Search bar, `q`/`Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use journalscout::{handle_event, Action, Config, Event, Focus};

register_plugin!(State);

/// Context tag on clipboard commands so their results can be told apart.
const CLIPBOARD_CONTEXT_KEY: &str = "journalscout";
const CLIPBOARD_CONTEXT_VALUE: &str = "clipboard";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the one host concern it cannot
/// express as a return value: escape sequences that must be written as part
/// of the next frame.
struct State {
    /// Core application state from library layer.
    app: journalscout::AppState,

    /// OSC 52 sequences waiting for the next `render` call.
    pending_osc52: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: journalscout::initialize(&Config::default()),
            pending_osc52: Vec::new(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests
    /// permissions, and subscribes to events.
    ///
    /// An invalid configuration does not abort the load: the plugin starts
    /// with defaults, shows the error, and refuses to search.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let (config, config_error) = match Config::from_zellij(&configuration) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e.to_string())),
        };
        journalscout::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(base_url = %config.base_url, "parsed configuration");
        self.app = journalscout::initialize(&config);
        if let Some(error) = config_error {
            tracing::error!(%error, "invalid plugin configuration");
            self.app.config_error = Some(error);
        }

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Translates a host event, delegates to `handle_event`, and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::TimerElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::SearchResponse { status, body, context }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                let wrote_osc52 = actions.iter().any(|a| matches!(a, Action::EmitOsc52 { .. }));
                for action in actions {
                    self.execute_action(action);
                }
                should_render || wrote_osc52
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        for sequence in self.pending_osc52.drain(..) {
            print!("{sequence}");
        }
        self.app.set_viewport(rows, cols);
        journalscout::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the focused region.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, focus = ?self.app.focus, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('c') => Some(Event::CloseFocus),
                BareKey::Char('f') => Some(Event::ToggleFilterPanel),
                _ => None,
            };
        }
        if key.bare_key == BareKey::Tab {
            return Some(if key.has_modifiers(&[KeyModifier::Shift]) {
                Event::FocusPrev
            } else {
                Event::FocusNext
            });
        }

        match self.app.focus {
            Focus::SearchBar => Self::map_search_bar_key(key.bare_key),
            Focus::FilterPanel => Self::map_panel_key(key.bare_key),
            Focus::Chips => Self::map_chips_key(key.bare_key),
            Focus::Results => Self::map_results_key(key.bare_key),
        }
    }

    fn map_search_bar_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::ClearQuery,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::FocusNext,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_panel_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::PanelDown,
            BareKey::Up | BareKey::Char('k') => Event::PanelUp,
            BareKey::Enter | BareKey::Char(' ') => Event::PanelToggle,
            BareKey::Left | BareKey::Char('h') => Event::PanelAdjust(-1),
            BareKey::Right | BareKey::Char('l') => Event::PanelAdjust(1),
            BareKey::Char('H') => Event::PanelAdjustCoarse(false),
            BareKey::Char('L') => Event::PanelAdjustCoarse(true),
            BareKey::Char('x') => Event::ClearFilters,
            BareKey::Char('f') | BareKey::Esc => Event::ToggleFilterPanel,
            BareKey::Char('/') => Event::FocusSearchBar,
            _ => return None,
        })
    }

    fn map_chips_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Left | BareKey::Char('h') => Event::ChipLeft,
            BareKey::Right | BareKey::Char('l') => Event::ChipRight,
            BareKey::Backspace | BareKey::Delete | BareKey::Char('d') => Event::RemoveChip,
            BareKey::Char('x') => Event::ClearFilters,
            BareKey::Char('f') => Event::ToggleFilterPanel,
            BareKey::Char('/') | BareKey::Esc => Event::FocusSearchBar,
            _ => return None,
        })
    }

    fn map_results_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Right | BareKey::PageDown | BareKey::Char('n') => Event::NextPage,
            BareKey::Left | BareKey::PageUp | BareKey::Char('p') => Event::PrevPage,
            BareKey::Home | BareKey::Char('g') => Event::ScrollToTop,
            BareKey::Char(' ') => Event::ToggleRowSelection,
            BareKey::Char('a') => Event::ToggleSelectAll,
            BareKey::Enter | BareKey::Char('y') => Event::ExportCurrent,
            BareKey::Char('Y') => Event::ExportSelected,
            BareKey::Char('v') => Event::ToggleViewMode,
            BareKey::Char('s') => Event::CycleSortField,
            BareKey::Char('o') => Event::ToggleSortOrder,
            BareKey::Char('f') => Event::ToggleFilterPanel,
            BareKey::Char('x') => Event::ClearFilters,
            BareKey::Char('/') => Event::FocusSearchBar,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Only commands tagged as clipboard copies are of interest.
    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if context.get(CLIPBOARD_CONTEXT_KEY).map(String::as_str) != Some(CLIPBOARD_CONTEXT_VALUE) {
            tracing::debug!(?context, "ignoring untagged command result");
            return None;
        }
        tracing::debug!(exit_code = ?exit_code, "clipboard command finished");
        Some(Event::ClipboardCommandFinished {
            success: exit_code == Some(0),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::StartTimer { seconds } => {
                set_timeout(seconds);
            }
            Action::SendWebRequest(request) => {
                tracing::debug!(url = %request.url, body_len = request.body.len(), "sending search request");
                web_request(
                    request.url,
                    HttpVerb::Post,
                    request.headers,
                    request.body,
                    request.context,
                );
            }
            Action::EmitOsc52 { sequence } => {
                self.pending_osc52.push(sequence);
            }
            Action::RunCopyCommand { argv } => {
                let args: Vec<&str> = argv.iter().map(String::as_str).collect();
                let context = BTreeMap::from([(
                    CLIPBOARD_CONTEXT_KEY.to_string(),
                    CLIPBOARD_CONTEXT_VALUE.to_string(),
                )]);
                run_command(&args, context);
            }
        }
    }
}
