use crate::{DisplayState, Supervisor, SupervisorEvent};

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{sleep, timeout},
};

// Long enough to never exit during a test on its own.
const LONG_RUNNING: &[&str] = &["sleep", "30"];
// Exits immediately.
const SHORT_LIVED: &[&str] = &["true"];
const MISSING_BINARY: &[&str] = &["tray-toggle-test-no-such-binary"];

// One poll interval is 1s; allow generous slack for loaded CI machines.
const EXIT_OBSERVATION: Duration = Duration::from_secs(4);
const QUIET_PERIOD: Duration = Duration::from_millis(1500);

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// WHAT: Start transitions to Running, stop back to Stopped, both idempotent
/// WHY: Menu clicks can arrive in any order; repeated clicks must be no-ops
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_any_start_stop_sequence_when_applied_then_state_matches_net_effect() {
    // Given: A supervisor over a long-running command
    let (event_tx, _event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(LONG_RUNNING), event_tx);
    assert!(!supervisor.is_running().await);

    // When/Then: start, redundant start, stop, redundant stop
    supervisor.start().await.unwrap();
    assert!(supervisor.is_running().await);
    assert_eq!(supervisor.display_state().await, DisplayState::Running);

    supervisor.start().await.unwrap();
    assert!(supervisor.is_running().await);

    supervisor.stop().await.unwrap();
    assert!(!supervisor.is_running().await);
    assert_eq!(supervisor.display_state().await, DisplayState::Stopped);

    supervisor.stop().await.unwrap();
    assert!(!supervisor.is_running().await);

    // And: the cycle can begin again
    supervisor.start().await.unwrap();
    assert!(supervisor.is_running().await);
    supervisor.shutdown().await.unwrap();
}

/// WHAT: A second start while running does not create a second poller
/// WHY: Duplicate pollers would emit duplicate exit refreshes
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_running_process_when_started_again_then_exit_emits_single_event() {
    // Given: A short-lived command started twice in quick succession
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(&["sleep", "1"]), event_tx);
    supervisor.start().await.unwrap();
    supervisor.start().await.unwrap();

    // When: The process exits on its own
    let first = timeout(EXIT_OBSERVATION, event_rx.recv()).await.unwrap();

    // Then: Exactly one exit notification, then silence
    assert_eq!(first, Some(SupervisorEvent::Exited));
    assert!(timeout(QUIET_PERIOD, event_rx.recv()).await.is_err());
    assert_eq!(supervisor.display_state().await, DisplayState::Stopped);
}

/// WHAT: Self-exit is observed within one poll interval
/// WHY: The icon must flip to Stopped without any user action
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_short_lived_command_when_started_then_exit_observed_without_stop() {
    // Given: A command that exits immediately after starting
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(SHORT_LIVED), event_tx);
    supervisor.start().await.unwrap();

    // When: Waiting for the poller, no stop() issued
    let event = timeout(EXIT_OBSERVATION, event_rx.recv()).await.unwrap();

    // Then: One Running -> Stopped transition was reported
    assert_eq!(event, Some(SupervisorEvent::Exited));
    assert!(!supervisor.is_running().await);
    assert_eq!(supervisor.display_state().await, DisplayState::Stopped);
}

/// WHAT: Spawn failure is reported, state stays Stopped, no poller starts
/// WHY: A bad command must not crash the tool or leak background tasks
#[tokio::test]
async fn given_missing_binary_when_started_then_error_and_stopped() {
    // Given: A command that cannot be located by the OS
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(MISSING_BINARY), event_tx);

    // When: Starting fails
    let result = supervisor.start().await;

    // Then: Error surfaced, display stays Stopped, poller never runs
    assert!(result.is_err());
    assert!(!supervisor.is_running().await);
    assert_eq!(supervisor.display_state().await, DisplayState::Stopped);
    assert!(timeout(QUIET_PERIOD, event_rx.recv()).await.is_err());
}

/// WHAT: Shutdown stops the child and reaps the poller before returning
/// WHY: Quit must not leave a stray process or an orphaned poller behind
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_running_process_when_shutdown_then_child_dead_and_poller_joined() {
    // Given: A running long-lived command
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(LONG_RUNNING), event_tx);
    supervisor.start().await.unwrap();
    assert!(supervisor.is_running().await);

    // When: Shutting down
    supervisor.shutdown().await.unwrap();

    // Then: The child is confirmed gone and the poller already reported it
    assert!(!supervisor.is_running().await);
    assert!(matches!(event_rx.try_recv(), Ok(SupervisorEvent::Exited)));

    // And: A fresh start still works after shutdown
    supervisor.start().await.unwrap();
    assert!(supervisor.is_running().await);
    supervisor.shutdown().await.unwrap();
}

/// WHAT: A stale exited handle reads as Stopped on every query
/// WHY: Display state must never be served from a cached value
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_exited_child_when_queried_then_stopped_before_poller_notices() {
    // Given: A command that exits right away
    let (event_tx, _event_rx) = mpsc::channel(8);
    let supervisor = Supervisor::new(command(SHORT_LIVED), event_tx);
    supervisor.start().await.unwrap();

    // When: Querying shortly after exit but likely before the first poll tick
    sleep(Duration::from_millis(300)).await;

    // Then: The fresh OS check already reports Stopped
    assert_eq!(supervisor.display_state().await, DisplayState::Stopped);
}
