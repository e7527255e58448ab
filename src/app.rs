use crate::api::{HttpRecorderApi, RecorderApi};
use crate::config::Config;
use crate::input;
use crate::messages::PanelCommand;
use crate::services::StatusPoller;
use crate::ui::TermUi;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct App {
    config: Config,
    api: Arc<dyn RecorderApi>,
    command_rx: mpsc::Receiver<PanelCommand>,
    awaiting_stop_confirmation: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn RecorderApi> = Arc::new(HttpRecorderApi::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?);

        Self::spawn_poller(&config, api.clone());
        let command_rx = Self::spawn_input_reader();

        tracing::info!(
            "Watching recorder at {}. Commands: (r)ecord, (s)top, (q)uit",
            config.base_url
        );

        Ok(Self {
            config,
            api,
            command_rx,
            awaiting_stop_confirmation: false,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received Ctrl+C, shutting down");
                    break;
                }
            }
        }

        tracing::info!("Panel shutdown complete");
        Ok(())
    }

    /// Handle one panel command; returns false when the app should exit.
    ///
    /// Any command other than an explicit confirm drops a pending stop
    /// confirmation.
    fn handle_command(&mut self, cmd: PanelCommand) -> bool {
        let confirming = std::mem::take(&mut self.awaiting_stop_confirmation);

        match cmd {
            PanelCommand::StartRecording => self.dispatch_start(),

            PanelCommand::StopRecording => {
                if self.config.confirm_stop {
                    self.awaiting_stop_confirmation = true;
                    tracing::info!(
                        "This will stop recording immediately. Type 'y' to confirm, 'n' to cancel."
                    );
                } else {
                    self.dispatch_stop();
                }
            }

            PanelCommand::Confirm => {
                if confirming {
                    self.dispatch_stop();
                } else {
                    tracing::debug!("Nothing to confirm");
                }
            }

            PanelCommand::Cancel => {
                if confirming {
                    tracing::info!("Stop cancelled");
                }
            }

            PanelCommand::Quit => return false,
        }

        true
    }

    /// Commands are fire-and-forget: the response is ignored and their
    /// effect shows up on the panel through a later status poll.
    fn dispatch_start(&self) {
        tracing::info!("Requesting recording start");
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.start().await {
                tracing::warn!("Start command failed: {:#}", e);
            }
        });
    }

    fn dispatch_stop(&self) {
        tracing::info!("Requesting recording stop");
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.stop().await {
                tracing::warn!("Stop command failed: {:#}", e);
            }
        });
    }

    fn spawn_poller(config: &Config, api: Arc<dyn RecorderApi>) {
        let poller = StatusPoller::new(
            api,
            Box::new(TermUi::new()),
            Duration::from_millis(config.poll_interval_ms),
            &config.recording_extension,
        );
        tokio::spawn(poller.run());
    }

    fn spawn_input_reader() -> mpsc::Receiver<PanelCommand> {
        let (tx, rx) = mpsc::channel(10);
        tokio::spawn(async move {
            if let Err(e) = input::read_commands(tx).await {
                tracing::error!("Input reader failed: {:#}", e);
            }
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{RecorderState, RecorderStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingApi {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    #[async_trait]
    impl RecorderApi for CountingApi {
        async fn status(&self) -> Result<RecorderStatus> {
            Ok(RecorderStatus {
                status: RecorderState::Idle,
                time_string: String::new(),
                filename: String::new(),
            })
        }

        async fn start(&self) -> Result<()> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self) -> Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_app(confirm_stop: bool) -> (App, Arc<CountingApi>) {
        let api = Arc::new(CountingApi::default());
        let (_tx, command_rx) = mpsc::channel(1);
        let app = App {
            config: Config {
                confirm_stop,
                ..Config::default()
            },
            api: api.clone(),
            command_rx,
            awaiting_stop_confirmation: false,
        };
        (app, api)
    }

    /// Dispatches are spawned tasks; give them a moment to land.
    async fn wait_for(counter: &AtomicUsize, expected: usize) {
        for _ in 0..100 {
            if counter.load(Ordering::SeqCst) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn start_is_dispatched_immediately() {
        let (mut app, api) = test_app(true);

        assert!(app.handle_command(PanelCommand::StartRecording));

        wait_for(&api.starts, 1).await;
        assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stop_waits_for_confirmation() {
        let (mut app, api) = test_app(true);

        assert!(app.handle_command(PanelCommand::StopRecording));
        assert!(app.awaiting_stop_confirmation);
        assert_eq!(api.stops.load(Ordering::SeqCst), 0);

        assert!(app.handle_command(PanelCommand::Confirm));
        wait_for(&api.stops, 1).await;
        assert_eq!(api.stops.load(Ordering::SeqCst), 1);
        assert!(!app.awaiting_stop_confirmation);
    }

    #[tokio::test]
    async fn cancel_drops_a_pending_stop() {
        let (mut app, api) = test_app(true);

        assert!(app.handle_command(PanelCommand::StopRecording));
        assert!(app.handle_command(PanelCommand::Cancel));
        assert!(!app.awaiting_stop_confirmation);

        // A later confirm on its own must not stop anything
        assert!(app.handle_command(PanelCommand::Confirm));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(api.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn another_command_drops_a_pending_stop() {
        let (mut app, api) = test_app(true);

        assert!(app.handle_command(PanelCommand::StopRecording));
        assert!(app.handle_command(PanelCommand::StartRecording));
        assert!(!app.awaiting_stop_confirmation);

        assert!(app.handle_command(PanelCommand::Confirm));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(api.stops.load(Ordering::SeqCst), 0);

        wait_for(&api.starts, 1).await;
        assert_eq!(api.starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stop_is_immediate_without_confirmation() {
        let (mut app, api) = test_app(false);

        assert!(app.handle_command(PanelCommand::StopRecording));

        wait_for(&api.stops, 1).await;
        assert_eq!(api.stops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn quit_ends_the_command_loop() {
        let (mut app, _api) = test_app(true);

        assert!(!app.handle_command(PanelCommand::Quit));
    }
}
