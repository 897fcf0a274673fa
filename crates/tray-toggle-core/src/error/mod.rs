use error_location::ErrorLocation;
use thiserror::Error;

/// Process supervision errors with source location tracking.
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The configured command could not be spawned.
    #[error("Failed to spawn {command:?}: {source} {location}")]
    Spawn {
        /// Executable that failed to spawn.
        command: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sending the termination request to the child failed.
    #[error("Failed to request termination of pid {pid}: {reason} {location}")]
    Terminate {
        /// Process ID the request was addressed to.
        pid: u32,
        /// Description of the signalling failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Waiting for the child to exit failed at the OS level.
    #[error("Failed to wait for child exit: {source} {location}")]
    Wait {
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`SupervisorError`].
pub type Result<T> = std::result::Result<T, SupervisorError>;
