use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;
use tray_toggle_core::SupervisorError;

/// Application-level errors for the tray-toggle binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// A CLI color option failed to parse as a color specification.
    #[error("Invalid color value for '{flag}' -- specified value was {value:?} {location}")]
    InvalidColor {
        /// The offending CLI flag.
        flag: String,
        /// The value that failed to parse.
        value: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The icon glyph option was not a single character.
    #[error("Invalid value for '--id-char' -- expected a single character, got {value:?} {location}")]
    InvalidGlyph {
        /// The value that was rejected.
        value: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// No command vector was supplied.
    #[error("You must at minimum provide a command to run {location}")]
    MissingCommand {
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The command executable was not found, including the
    /// current-working-directory fallback.
    #[error("Command file '{path}' not found (also not in current directory) {location}")]
    CommandNotFound {
        /// The executable path as supplied on the command line.
        path: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Tray icon or menu operation failed.
    #[error("Tray error: {reason} {location}")]
    TrayError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Process supervision error from tray-toggle-core.
    #[error("Supervisor error: {source} {location}")]
    Supervisor {
        /// The underlying supervisor error.
        #[source]
        source: SupervisorError,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<SupervisorError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<SupervisorError> for AppError {
    #[track_caller]
    fn from(source: SupervisorError) -> Self {
        AppError::Supervisor {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
