use tray_toggle_core::DisplayState;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and the loop exit flow through this enum.
#[derive(Debug, Clone, Copy)]
pub enum TrayCommand {
    /// Refresh the tray display to a new state.
    SetState(DisplayState),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
