//! Process lifecycle supervisor.
//!
//! Owns a single managed child process and a single background liveness
//! poller. Start/stop/shutdown are idempotent; exit transitions observed by
//! the poller are reported once through the event channel.

use crate::{CoreResult, SupervisorError};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    process::{Child, Command},
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::timeout,
};
use tracing::{debug, info, instrument, warn};

/// Interval between liveness checks of the managed process.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long a stopped child gets to exit gracefully before a force kill.
const STOP_GRACE: Duration = Duration::from_secs(5);

/// Display states derived from child liveness. Never cached - always
/// recomputed from a fresh exit-status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// The managed process is alive.
    Running,
    /// No managed process, or it has exited.
    Stopped,
}

/// Transition notifications emitted by the liveness poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// The managed process is no longer running. Sent exactly once per
    /// poller lifetime; the poller terminates itself after sending.
    Exited,
}

struct Inner {
    command: Vec<String>,
    child: Option<Child>,
    poller: Option<JoinHandle<()>>,
    events: mpsc::Sender<SupervisorEvent>,
}

impl Inner {
    /// Fresh liveness check against the OS. `try_wait` reaps an exited
    /// child but never touches the supervisor's own fields.
    fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn poller_active(&self) -> bool {
        self.poller.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

/// Supervises a single external command.
///
/// Cheap to clone - all clones share the same child-process slot and
/// poller slot behind one mutex. The mutex is held only for short state
/// inspections and for the duration of a stop (which must block until the
/// child has exited).
#[derive(Clone)]
pub struct Supervisor {
    inner: Arc<Mutex<Inner>>,
}

impl Supervisor {
    /// Creates a supervisor for `command` (executable plus arguments).
    ///
    /// No process is started; call [`start`](Self::start). Exit
    /// transitions observed by the poller are sent on `events`.
    pub fn new(command: Vec<String>, events: mpsc::Sender<SupervisorEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                command,
                child: None,
                poller: None,
                events,
            })),
        }
    }

    /// Spawns the configured command if it is not already running.
    ///
    /// Idempotent: a start while running is a no-op. On success exactly one
    /// liveness poller is active afterwards - an already-active poller is
    /// reused, never duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::Spawn`] if the OS rejects the spawn. The
    /// supervisor stays in the Stopped state and a later retry is allowed.
    #[instrument(skip(self))]
    pub async fn start(&self) -> CoreResult<()> {
        let mut inner = self.inner.lock().await;

        if inner.is_running() {
            debug!("Start requested while already running, ignoring");
            return Ok(());
        }

        let (program, args) = match inner.command.split_first() {
            Some((program, args)) => (program.clone(), args.to_vec()),
            None => return Ok(()),
        };

        let child = Command::new(&program).args(&args).spawn().map_err(|e| {
            SupervisorError::Spawn {
                command: program.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        info!(pid = child.id(), command = %program, "Managed command started");
        inner.child = Some(child);

        if !inner.poller_active() {
            inner.poller = Some(tokio::spawn(Self::poll_loop(Arc::clone(&self.inner))));
        }

        Ok(())
    }

    /// Stops the managed process if it is running.
    ///
    /// Requests graceful termination, waits up to a grace period for the
    /// child to exit, then escalates to a force kill. Blocks until the
    /// exit is confirmed. Idempotent: a stop while stopped is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the termination request or the exit wait fails
    /// at the OS level.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> CoreResult<()> {
        let mut inner = self.inner.lock().await;

        let Some(mut child) = inner.child.take() else {
            debug!("Stop requested while not running, ignoring");
            return Ok(());
        };

        if !matches!(child.try_wait(), Ok(None)) {
            // Already exited on its own; the handle just needed clearing.
            return Ok(());
        }

        info!(pid = child.id(), "Stopping managed command");
        request_termination(&mut child)?;

        match timeout(STOP_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                info!(%status, "Managed command exited");
            }
            Ok(Err(e)) => {
                return Err(SupervisorError::Wait {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Err(_) => {
                warn!(
                    grace_secs = STOP_GRACE.as_secs(),
                    "Managed command ignored termination request, force killing"
                );
                child.kill().await.map_err(|e| SupervisorError::Wait {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                })?;
            }
        }

        Ok(())
    }

    /// Stops the managed process and reaps the liveness poller.
    ///
    /// Called on quit: when this returns, the child is confirmed dead and
    /// no poller task is left behind, so the UI loop can safely be told to
    /// exit.
    ///
    /// # Errors
    ///
    /// Propagates [`stop`](Self::stop) failures.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> CoreResult<()> {
        self.stop().await?;

        let handle = self.inner.lock().await.poller.take();
        if let Some(handle) = handle {
            // The poller notices the stopped child within one interval and
            // returns; allow a little slack beyond that.
            match timeout(POLL_INTERVAL * 3, handle).await {
                Ok(Ok(())) => debug!("Liveness poller stopped cleanly"),
                Ok(Err(e)) => warn!(error = ?e, "Liveness poller task panicked"),
                Err(_) => warn!("Liveness poller did not stop within timeout"),
            }
        }

        Ok(())
    }

    /// True iff a child process is held and the OS reports it alive.
    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.is_running()
    }

    /// Current display state, computed from a fresh liveness check.
    pub async fn display_state(&self) -> DisplayState {
        if self.is_running().await {
            DisplayState::Running
        } else {
            DisplayState::Stopped
        }
    }

    /// Background liveness poller.
    ///
    /// Pure observation while the child is alive. On the first dead
    /// observation it emits one [`SupervisorEvent::Exited`], frees its own
    /// slot so a future start can spawn a fresh poller, and returns. The
    /// lock is held only for the duration of one liveness check per tick.
    async fn poll_loop(inner: Arc<Mutex<Inner>>) {
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;

            let mut guard = inner.lock().await;
            if !guard.is_running() {
                debug!("Poller observed managed command gone");
                let _ = guard.events.try_send(SupervisorEvent::Exited);
                guard.poller = None;
                return;
            }
        }
    }
}

/// Asks the child to exit gracefully (SIGTERM on Unix).
#[cfg(unix)]
#[track_caller]
fn request_termination(child: &mut Child) -> CoreResult<()> {
    use nix::{
        sys::signal::{Signal, kill},
        unistd::Pid,
    };

    let Some(pid) = child.id() else {
        return Ok(());
    };

    kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|e| SupervisorError::Terminate {
        pid,
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// No portable graceful signal outside Unix; fall back to a hard kill
/// request and let the subsequent wait confirm the exit.
#[cfg(not(unix))]
#[track_caller]
fn request_termination(child: &mut Child) -> CoreResult<()> {
    let pid = child.id().unwrap_or_default();

    child.start_kill().map_err(|e| SupervisorError::Terminate {
        pid,
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
