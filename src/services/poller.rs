use crate::api::RecorderApi;
use crate::status::{RecorderState, RecorderStatus};
use crate::ui::{Control, Indicator, TextField, UiSink};
use std::sync::Arc;
use std::time::Duration;

/// Drives the panel from the recorder's reported state
///
/// This service:
/// - Polls the `status` endpoint in an endless loop
/// - Rewrites the panel from each snapshot through the injected sink
/// - Surfaces poll failures on the panel and keeps going
///
/// The next poll is scheduled a fixed delay after the current attempt
/// completes, so a slow response pushes later polls back rather than
/// piling up overlapping requests. There is no backoff and no retry
/// limit; the loop only ends when its task is dropped.
pub struct StatusPoller {
    api: Arc<dyn RecorderApi>,
    sink: Box<dyn UiSink>,
    interval: Duration,
    idle_filename: String,
}

impl StatusPoller {
    pub fn new(
        api: Arc<dyn RecorderApi>,
        sink: Box<dyn UiSink>,
        interval: Duration,
        recording_extension: &str,
    ) -> Self {
        Self {
            api,
            sink,
            interval,
            idle_filename: format!("*.{}", recording_extension),
        }
    }

    pub async fn run(mut self) {
        loop {
            match self.api.status().await {
                Ok(status) => self.apply_status(&status),
                Err(e) => self.apply_failure(&format!("{:#}", e)),
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Rewrite the panel from one status snapshot.
    ///
    /// The three state checks are independent conditionals, not a switch:
    /// every else-arm must run so indicators left over from the previous
    /// snapshot are cleared.
    fn apply_status(&mut self, status: &RecorderStatus) {
        tracing::debug!("Recorder status: {}", status.status);

        self.sink.hide(Indicator::ConnectionFailed);
        self.sink.set_text(TextField::Time, &status.time_string);

        if status.status == RecorderState::Idle {
            self.sink.enable(Control::Record);
            self.sink.disable(Control::Stop);
            self.sink.show(Indicator::Stopped);
            self.sink.set_text(TextField::Filename, &self.idle_filename);
        } else {
            self.sink.hide(Indicator::Stopped);
        }

        if status.status == RecorderState::Recording {
            self.sink.enable(Control::Stop);
            self.sink.disable(Control::Record);
            self.sink.show(Indicator::Recording);
            self.sink.set_text(TextField::Filename, &status.filename);
        } else {
            self.sink.hide(Indicator::Recording);
        }

        if status.status == RecorderState::Error || status.status == RecorderState::Writing {
            self.sink.disable(Control::Record);
            self.sink.disable(Control::Stop);
            if status.status == RecorderState::Error {
                self.sink.show(Indicator::UnknownError);
                self.sink.hide(Indicator::Busy);
            } else {
                self.sink.hide(Indicator::UnknownError);
                self.sink.show(Indicator::Busy);
            }
        } else {
            self.sink.hide(Indicator::UnknownError);
            self.sink.hide(Indicator::Busy);
        }

        self.sink.refresh();
    }

    /// Surface a failed poll.
    ///
    /// Only the error indicator, its message, and the control enablement
    /// change; time, filename, and the other indicators keep their last
    /// values until the next successful poll.
    fn apply_failure(&mut self, description: &str) {
        tracing::warn!("Status poll failed: {}", description);

        self.sink.show(Indicator::UnknownError);
        self.sink.set_text(TextField::ErrorMessage, description);
        self.sink.disable(Control::Record);
        self.sink.disable(Control::Stop);

        self.sink.refresh();
    }
}
