//! Tray-toggle Core Library
//!
//! Process lifecycle supervision for a single managed command, plus the
//! status icon renderer. The [`Supervisor`] owns at most one child process
//! and one background liveness poller at a time; exit transitions are
//! reported through a [`SupervisorEvent`] channel.
//!
//! # Example
//!
//! ```no_run
//! use tray_toggle_core::{CoreResult, Supervisor};
//!
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let (event_tx, mut event_rx) = mpsc::channel(8);
//!     let supervisor = Supervisor::new(vec!["sleep".into(), "30".into()], event_tx);
//!
//!     supervisor.start().await?;
//!     assert!(supervisor.is_running().await);
//!
//!     supervisor.shutdown().await?;
//!     assert!(!supervisor.is_running().await);
//!
//!     let _ = event_rx.try_recv();
//!     Ok(())
//! }
//! ```

mod error;
mod icon;
mod supervisor;

pub use {
    error::{Result as CoreResult, SupervisorError},
    icon::{ICON_SIZE, render_icon},
    supervisor::{DisplayState, POLL_INTERVAL, Supervisor, SupervisorEvent},
};

#[cfg(test)]
mod tests;
