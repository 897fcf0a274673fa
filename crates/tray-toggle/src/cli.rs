//! Command-line surface.
//!
//! Everything after the recognized flags (or after an explicit `--`) is the
//! command to launch, so the wrapped command keeps its own flags untouched.

use crate::config::{
    DEFAULT_BG_COLOR, DEFAULT_FONT_COLOR, DEFAULT_RUNNING_DOT_COLOR, DEFAULT_STOPPED_DOT_COLOR,
};

use clap::Parser;

/// Wrap any command in a status tray icon with start/stop/quit controls.
#[derive(Debug, Parser)]
#[command(name = "tray-toggle", version, about)]
pub struct Cli {
    /// Tooltip text for the tray icon. Can have spaces.
    /// (default: executable name, stripped)
    #[arg(long)]
    pub tooltip: Option<String>,

    /// Single character shown on the tray icon.
    /// (default: tooltip, first char, uppercased)
    #[arg(long)]
    pub id_char: Option<String>,

    /// Color for the tray icon background.
    #[arg(long, default_value = DEFAULT_BG_COLOR)]
    pub bg_color: String,

    /// Color for the tray icon font.
    #[arg(long, default_value = DEFAULT_FONT_COLOR)]
    pub font_color: String,

    /// Color for the dot in the "Stopped" state.
    #[arg(long, default_value = DEFAULT_STOPPED_DOT_COLOR)]
    pub stopped_dot_color: String,

    /// Color for the dot in the "Running" state.
    #[arg(long, default_value = DEFAULT_RUNNING_DOT_COLOR)]
    pub running_dot_color: String,

    /// Color for the font in the "Stopped" state, overriding --font-color.
    #[arg(long)]
    pub stopped_font_color: Option<String>,

    /// Color for the font in the "Running" state, overriding --font-color.
    #[arg(long)]
    pub running_font_color: Option<String>,

    /// Color for the background in the "Stopped" state, overriding --bg-color.
    #[arg(long)]
    pub stopped_bg_color: Option<String>,

    /// Color for the background in the "Running" state, overriding --bg-color.
    #[arg(long)]
    pub running_bg_color: Option<String>,

    /// Start the command immediately.
    #[arg(long)]
    pub start_now: bool,

    /// Command to run, with its arguments. Use `--` before it to keep its
    /// flags away from tray-toggle's own.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
