//! Tray-toggle: wrap any external command in a status tray icon with
//! start/stop/quit controls.

mod app;
mod cli;
mod config;
mod error;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_manager;

pub(crate) use {
    app::App,
    cli::Cli,
    config::{IconPalette, LaunchConfig},
    error::{AppError, Result as AppResult},
    tray_command::TrayCommand,
    tray_manager::TrayManager,
};

use clap::{CommandFactory, Parser};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::mpsc;
use tracing::error;
use tray_toggle_core::Supervisor;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("tray_toggle=debug")
        .init();

    let cli = Cli::parse();

    if cli.command.is_empty() {
        eprintln!("You must at minimum provide a command to run.\n");
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    // All validation failures are reported together, before any UI exists.
    let config = match LaunchConfig::from_cli(cli) {
        Ok(config) => config,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayIcon is !Send on every platform, so TrayManager never leaves
    // the main thread.
    let mut tray_manager = match TrayManager::new(&config) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::SetState(state) => {
                    if let Err(e) = tray_manager.update_state(state) {
                        error!(error = ?e, "Failed to update tray icon");
                    }
                }
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(tao::event::StartCause::Init) => {
                let (supervisor_tx, supervisor_rx) = mpsc::channel(8);
                let supervisor = Supervisor::new(config.command.clone(), supervisor_tx);

                let app = App {
                    supervisor,
                    supervisor_events: supervisor_rx,
                    tray_proxy: tray_proxy.clone(),
                    tooltip: config.tooltip.clone(),
                    autostart: config.autostart,
                    start_menu_id: tray_manager.start_item_id().clone(),
                    stop_menu_id: tray_manager.stop_item_id().clone(),
                    quit_menu_id: tray_manager.quit_item_id().clone(),
                };

                // The supervisor and app loop run on a tokio runtime on
                // their own thread; only TrayCommand messages cross back.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }
    });
}
