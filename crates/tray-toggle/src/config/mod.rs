mod icon_colors;
mod launch_config;

pub(crate) use {
    icon_colors::{IconColors, IconPalette},
    launch_config::LaunchConfig,
};

pub(crate) const DEFAULT_BG_COLOR: &str = "blue";
pub(crate) const DEFAULT_FONT_COLOR: &str = "yellow";
pub(crate) const DEFAULT_STOPPED_DOT_COLOR: &str = "red";
pub(crate) const DEFAULT_RUNNING_DOT_COLOR: &str = "green";
