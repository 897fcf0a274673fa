/// RGBA colors for one display state's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPalette {
    /// Fill color of the status dot.
    pub dot: [u8; 4],
    /// Icon background color.
    pub background: [u8; 4],
    /// Glyph color.
    pub font: [u8; 4],
}

/// The two state palettes, resolved once from CLI options. Per-state
/// overrides fall back to the global background/font colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconColors {
    /// Palette while the managed command is running.
    pub running: IconPalette,
    /// Palette while the managed command is stopped.
    pub stopped: IconPalette,
}
