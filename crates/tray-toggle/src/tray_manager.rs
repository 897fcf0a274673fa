//! System tray icon with state-based updates.
//!
//! Owns the status icon, its tooltip and the three-item context menu
//! (Start/Stop/Quit). The two state bitmaps are rendered once at
//! construction and swapped on every refresh; menu enablement follows the
//! display state.

use crate::{AppError, AppResult, IconPalette, LaunchConfig};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use tray_toggle_core::{DisplayState, render_icon};

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    tooltip: String,
    running_icon: Icon,
    stopped_icon: Icon,
    start_item: MenuItem,
    stop_item: MenuItem,
    quit_item: MenuItem,
}

impl TrayManager {
    /// Create the tray icon in the Stopped state.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn new(config: &LaunchConfig) -> AppResult<Self> {
        let menu = Menu::new();

        let start_item = MenuItem::new(format!("Start {}", config.tooltip), true, None);
        let stop_item = MenuItem::new(format!("Stop {}", config.tooltip), false, None);
        let quit_item = MenuItem::new("Quit", true, None);

        menu.append(&start_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add start menu item: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        menu.append(&stop_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add stop menu item: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        menu.append(&quit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add quit menu item: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let running_icon = build_icon(config, config.colors.running)?;
        let stopped_icon = build_icon(config, config.colors.stopped)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(format!("{} (Closed)", config.tooltip))
            .with_menu(Box::new(menu))
            .with_icon(stopped_icon.clone())
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            tooltip: config.tooltip.clone(),
            running_icon,
            stopped_icon,
            start_item,
            stop_item,
            quit_item,
        })
    }

    /// Refresh icon, tooltip and menu enablement for the given state.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: DisplayState) -> AppResult<()> {
        let (icon, suffix, running) = match state {
            DisplayState::Running => (self.running_icon.clone(), "Running", true),
            DisplayState::Stopped => (self.stopped_icon.clone(), "Closed", false),
        };

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(format!("{} ({})", self.tooltip, suffix)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.start_item.set_enabled(!running);
        self.stop_item.set_enabled(running);

        Ok(())
    }

    /// Get the start menu item ID.
    pub fn start_item_id(&self) -> &MenuId {
        self.start_item.id()
    }

    /// Get the stop menu item ID.
    pub fn stop_item_id(&self) -> &MenuId {
        self.stop_item.id()
    }

    /// Get the quit menu item ID.
    pub fn quit_item_id(&self) -> &MenuId {
        self.quit_item.id()
    }
}

/// Render one state bitmap and convert it for the tray host.
#[track_caller]
fn build_icon(config: &LaunchConfig, palette: IconPalette) -> AppResult<Icon> {
    let image = render_icon(palette.dot, palette.background, palette.font, config.glyph);
    let (width, height) = (image.width(), image.height());

    Icon::from_rgba(image.into_raw(), width, height).map_err(|e| AppError::TrayError {
        reason: format!("Failed to create icon from RGBA: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}
