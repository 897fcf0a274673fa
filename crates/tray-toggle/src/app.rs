use crate::{AppResult, TrayCommand};

use std::time::Duration;

use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tray_icon::menu::{MenuEvent, MenuId};
use tray_toggle_core::{Supervisor, SupervisorEvent};

/// Main application state.
///
/// Runs on the async runtime thread. Communicates tray updates back to the
/// main thread via `tray_proxy` because `TrayIcon` is `!Send` and must
/// remain on the UI thread. Every supervisor operation is followed by a
/// display refresh, whatever its outcome.
pub struct App {
    pub(crate) supervisor: Supervisor,
    pub(crate) supervisor_events: mpsc::Receiver<SupervisorEvent>,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) tooltip: String,
    pub(crate) autostart: bool,
    pub(crate) start_menu_id: MenuId,
    pub(crate) stop_menu_id: MenuId,
    pub(crate) quit_menu_id: MenuId,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(tooltip = %self.tooltip, "Tray-toggle starting");

        if self.autostart {
            info!(tooltip = %self.tooltip, "Autostart requested, starting managed command");
            if let Err(e) = self.supervisor.start().await {
                error!(error = %e, "Failed to start managed command");
            }
        }
        self.refresh().await;

        // Menu clicks arrive on MenuEvent's global crossbeam channel, which
        // only offers blocking recv(). One persistent blocking task bridges
        // it into the async loop; dropping tray_event_rx makes the next
        // blocking_send() fail, which ends the bridge.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if self.handle_menu_event(event).await {
                        break;
                    }
                }

                Some(SupervisorEvent::Exited) = self.supervisor_events.recv() => {
                    info!(tooltip = %self.tooltip, "Managed command closed");
                    self.refresh().await;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Menu event bridge stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Menu event bridge task panicked"),
            Err(_) => info!("Menu event bridge still blocked in recv, cleaned up on exit"),
        }

        info!("Tray-toggle shut down");

        Ok(())
    }

    /// Handle one tray menu click. Returns true when the loop should end.
    #[instrument(skip(self, event))]
    async fn handle_menu_event(&mut self, event: MenuEvent) -> bool {
        let event_id = &event.id;

        if *event_id == self.start_menu_id {
            info!(tooltip = %self.tooltip, "Start requested from tray menu");
            if let Err(e) = self.supervisor.start().await {
                error!(error = %e, "Failed to start managed command");
            }
            self.refresh().await;
        } else if *event_id == self.stop_menu_id {
            info!(tooltip = %self.tooltip, "Stop requested from tray menu");
            if let Err(e) = self.supervisor.stop().await {
                error!(error = %e, "Failed to stop managed command");
            }
            self.refresh().await;
        } else if *event_id == self.quit_menu_id {
            info!("Quit requested from tray menu");

            // The child must be confirmed dead and the poller reaped
            // before the UI loop is told to exit.
            if let Err(e) = self.supervisor.shutdown().await {
                error!(error = %e, "Failed to stop managed command during quit");
            }
            self.refresh().await;

            let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);
            return true;
        }

        false
    }

    /// Recompute the display state and push it to the UI thread.
    async fn refresh(&self) {
        let state = self.supervisor.display_state().await;
        let _ = self.tray_proxy.send_event(TrayCommand::SetState(state));
    }
}
