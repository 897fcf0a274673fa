//! Validated launch configuration.
//!
//! Built once from the CLI before any UI exists. Validation collects every
//! problem instead of stopping at the first, so a user fixing their flags
//! sees the whole list in one run.

use crate::{
    AppError, Cli,
    config::{IconColors, IconPalette},
};

use std::{env, panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::warn;

/// Immutable configuration consumed by the supervisor and the presenter.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Executable plus arguments of the managed command. Never empty.
    pub command: Vec<String>,
    /// Tooltip label, also used in the Start/Stop menu item titles.
    pub tooltip: String,
    /// Single identifying character drawn on the icon.
    pub glyph: char,
    /// Resolved per-state icon palettes.
    pub colors: IconColors,
    /// Start the managed command immediately at launch.
    pub autostart: bool,
}

impl LaunchConfig {
    /// Validates the parsed CLI and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns every validation failure at once: each invalid color with
    /// its flag name, a malformed glyph option, a missing command vector,
    /// or an executable that cannot be located.
    pub fn from_cli(cli: Cli) -> Result<Self, Vec<AppError>> {
        let mut errors = Vec::new();

        let bg = parse_color("--bg-color", &cli.bg_color, &mut errors);
        let font = parse_color("--font-color", &cli.font_color, &mut errors);
        let stopped_dot = parse_color("--stopped-dot-color", &cli.stopped_dot_color, &mut errors);
        let running_dot = parse_color("--running-dot-color", &cli.running_dot_color, &mut errors);

        let stopped_font = cli
            .stopped_font_color
            .as_deref()
            .and_then(|v| parse_color("--stopped-font-color", v, &mut errors));
        let running_font = cli
            .running_font_color
            .as_deref()
            .and_then(|v| parse_color("--running-font-color", v, &mut errors));
        let stopped_bg = cli
            .stopped_bg_color
            .as_deref()
            .and_then(|v| parse_color("--stopped-bg-color", v, &mut errors));
        let running_bg = cli
            .running_bg_color
            .as_deref()
            .and_then(|v| parse_color("--running-bg-color", v, &mut errors));

        let glyph_option = match cli.id_char.as_deref() {
            None => None,
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        errors.push(AppError::InvalidGlyph {
                            value: value.to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                        None
                    }
                }
            }
        };

        let mut command = cli.command;
        match command.first().cloned() {
            None => errors.push(AppError::MissingCommand {
                location: ErrorLocation::from(Location::caller()),
            }),
            Some(program) => {
                if let Some(resolved) = locate_executable(&program, &mut errors) {
                    command[0] = resolved;
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let (Some(bg), Some(font), Some(stopped_dot), Some(running_dot)) =
            (bg, font, stopped_dot, running_dot)
        else {
            return Err(errors);
        };
        let Some(program) = command.first() else {
            return Err(errors);
        };

        let tooltip = cli.tooltip.unwrap_or_else(|| default_tooltip(program));
        let glyph = glyph_option.unwrap_or_else(|| default_glyph(&tooltip));

        Ok(Self {
            command,
            tooltip,
            glyph,
            colors: IconColors {
                running: IconPalette {
                    dot: running_dot,
                    background: running_bg.unwrap_or(bg),
                    font: running_font.unwrap_or(font),
                },
                stopped: IconPalette {
                    dot: stopped_dot,
                    background: stopped_bg.unwrap_or(bg),
                    font: stopped_font.unwrap_or(font),
                },
            },
            autostart: cli.start_now,
        })
    }
}

/// Parses one color flag, recording a failure instead of short-circuiting.
#[track_caller]
fn parse_color(flag: &str, value: &str, errors: &mut Vec<AppError>) -> Option<[u8; 4]> {
    match csscolorparser::parse(value) {
        Ok(color) => Some(color.to_rgba8()),
        Err(_) => {
            errors.push(AppError::InvalidColor {
                flag: flag.to_string(),
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
            None
        }
    }
}

/// Locates the command executable: exact path first, then a file of the
/// same name in the current working directory (with a notice when that
/// fallback rewrites the path).
///
/// Returns the path the command should actually use, or `None` after
/// recording a not-found error.
#[track_caller]
fn locate_executable(given: &str, errors: &mut Vec<AppError>) -> Option<String> {
    let path = Path::new(given);
    if path.exists() {
        return Some(given.to_string());
    }

    if let (Some(name), Ok(cwd)) = (path.file_name(), env::current_dir()) {
        let fallback = cwd.join(name);
        if fallback.exists() {
            warn!(
                given = %given,
                using = %fallback.display(),
                "Command not found as given, using current-directory fallback"
            );
            return Some(fallback.display().to_string());
        }
    }

    errors.push(AppError::CommandNotFound {
        path: given.to_string(),
        location: ErrorLocation::from(Location::caller()),
    });
    None
}

/// Default tooltip: the executable name with directories and extension
/// stripped.
fn default_tooltip(program: &str) -> String {
    Path::new(program)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

/// Default glyph: first character of the tooltip, uppercased.
fn default_glyph(tooltip: &str) -> char {
    tooltip
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}
