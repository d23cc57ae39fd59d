//! Clipboard delivery for exported text.
//!
//! The plugin cannot touch the system clipboard directly. It either asks the
//! terminal to set it with an OSC 52 escape sequence written into the next
//! frame, or pipes the text into a configured copy tool (`wl-copy`, `pbcopy`,
//! `xclip -selection clipboard`, ...) through the host's command runner.
//! Whichever is configured is tried first; the other is the fallback.

use crate::domain::{Result, ScoutError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Largest base64 payload sent through OSC 52. Several terminals and tmux
/// silently drop longer sequences.
pub const MAX_OSC52_PAYLOAD: usize = 100_000;

/// Preferred clipboard mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMethod {
    #[default]
    Osc52,
    Command,
}

impl ClipboardMethod {
    /// # Errors
    ///
    /// Returns `ScoutError::Config` for an unknown method name.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "osc52" => Ok(Self::Osc52),
            "command" => Ok(Self::Command),
            other => Err(ScoutError::Config(format!(
                "clipboard must be \"osc52\" or \"command\", got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardConfig {
    pub method: ClipboardMethod,
    /// Shell command that reads the text on stdin.
    pub copy_command: Option<String>,
}

/// A concrete way to deliver one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPlan {
    /// Escape sequence to print with the next render.
    Osc52 { sequence: String },
    /// Argument vector for the host command runner.
    Command { argv: Vec<String> },
}

impl ClipboardPlan {
    #[must_use]
    pub const fn method(&self) -> ClipboardMethod {
        match self {
            Self::Osc52 { .. } => ClipboardMethod::Osc52,
            Self::Command { .. } => ClipboardMethod::Command,
        }
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
///
/// # Errors
///
/// Returns `ScoutError::Clipboard` when the encoded payload is too large.
pub fn osc52_sequence(text: &str) -> Result<String> {
    let payload = STANDARD.encode(text);
    if payload.len() > MAX_OSC52_PAYLOAD {
        return Err(ScoutError::Clipboard(format!(
            "export of {} bytes exceeds the OSC 52 limit",
            text.len()
        )));
    }
    Ok(format!("\x1b]52;c;{payload}\x07"))
}

/// Runs `copy_command` through `sh` with the text as a positional argument,
/// so no quoting of the exported text is ever needed.
fn command_argv(copy_command: &str, text: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        format!("printf '%s' \"$1\" | {copy_command}"),
        "sh".to_string(),
        text.to_string(),
    ]
}

fn plan_with(method: ClipboardMethod, config: &ClipboardConfig, text: &str) -> Result<ClipboardPlan> {
    match method {
        ClipboardMethod::Osc52 => Ok(ClipboardPlan::Osc52 { sequence: osc52_sequence(text)? }),
        ClipboardMethod::Command => config
            .copy_command
            .as_deref()
            .map(|cmd| ClipboardPlan::Command { argv: command_argv(cmd, text) })
            .ok_or_else(|| ScoutError::Clipboard("no copy_command configured".into())),
    }
}

/// Plans delivery with the configured method, falling back to the other one
/// if it cannot be used for this text.
///
/// # Errors
///
/// Returns `ScoutError::Clipboard` when neither mechanism is usable.
pub fn plan_copy(config: &ClipboardConfig, text: &str) -> Result<ClipboardPlan> {
    plan_with(config.method, config, text).or_else(|primary| {
        tracing::warn!(error = %primary, "primary clipboard method unavailable, trying fallback");
        plan_fallback(config, config.method, text)
    })
}

/// Plans the mechanism other than `failed`.
///
/// # Errors
///
/// Returns `ScoutError::Clipboard` when the fallback is unusable too.
pub fn plan_fallback(config: &ClipboardConfig, failed: ClipboardMethod, text: &str) -> Result<ClipboardPlan> {
    let other = match failed {
        ClipboardMethod::Osc52 => ClipboardMethod::Command,
        ClipboardMethod::Command => ClipboardMethod::Osc52,
    };
    plan_with(other, config, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn command_config() -> ClipboardConfig {
        ClipboardConfig {
            method: ClipboardMethod::Command,
            copy_command: Some("wl-copy".into()),
        }
    }

    #[test]
    fn osc52_wraps_base64_payload() {
        assert_eq!(osc52_sequence("hi").unwrap(), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn oversized_export_falls_back_to_command() {
        let config = ClipboardConfig {
            method: ClipboardMethod::Osc52,
            copy_command: Some("pbcopy".into()),
        };
        let text = "x".repeat(MAX_OSC52_PAYLOAD);
        let plan = plan_copy(&config, &text).unwrap();
        assert_eq!(plan.method(), ClipboardMethod::Command);
    }

    #[test]
    fn oversized_export_without_command_fails() {
        let text = "x".repeat(MAX_OSC52_PAYLOAD);
        let err = plan_copy(&ClipboardConfig::default(), &text).unwrap_err();
        assert!(matches!(err, ScoutError::Clipboard(_)));
    }

    #[test]
    fn command_passes_text_as_argument() {
        let plan = plan_copy(&command_config(), "Title: it's \"quoted\"").unwrap();
        let ClipboardPlan::Command { argv } = plan else {
            panic!("expected command plan");
        };
        assert_eq!(argv[2], "printf '%s' \"$1\" | wl-copy");
        assert_eq!(argv[4], "Title: it's \"quoted\"");
    }

    #[test]
    fn failed_command_falls_back_to_osc52() {
        let plan = plan_fallback(&command_config(), ClipboardMethod::Command, "a").unwrap();
        assert_eq!(plan.method(), ClipboardMethod::Osc52);
    }

    #[test]
    fn parses_method_names() {
        assert_eq!(ClipboardMethod::parse("OSC52").unwrap(), ClipboardMethod::Osc52);
        assert!(ClipboardMethod::parse("xclip").is_err());
    }
}
