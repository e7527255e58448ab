use super::sink::{Control, Indicator, TextField, UiSink};
use std::collections::{HashMap, HashSet};
use std::io::Write;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Terminal implementation of `UiSink`
///
/// Keeps the latest value per widget and repaints a fixed block of lines
/// on stdout each refresh, so the panel updates in place while logs go to
/// stderr. Starts with the "connection failed" indicator visible; the
/// first successful poll hides it.
pub struct TermUi {
    visible: HashSet<Indicator>,
    enabled: HashSet<Control>,
    texts: HashMap<TextField, String>,
    painted: bool,
}

impl TermUi {
    pub fn new() -> Self {
        let mut visible = HashSet::new();
        visible.insert(Indicator::ConnectionFailed);

        Self {
            visible,
            enabled: HashSet::new(),
            texts: HashMap::new(),
            painted: false,
        }
    }

    fn text(&self, field: TextField) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or("")
    }

    fn control_label(&self, control: Control, label: &str) -> String {
        if self.enabled.contains(&control) {
            format!("[{}]", label)
        } else {
            format!("{}[{}]{}", DIM, label, RESET)
        }
    }

    /// Render the panel as a fixed-height block of lines
    fn render_lines(&self) -> Vec<String> {
        let mut states = Vec::new();
        if self.visible.contains(&Indicator::Stopped) {
            states.push(format!("{}■ STOPPED{}", GREEN, RESET));
        }
        if self.visible.contains(&Indicator::Recording) {
            states.push(format!("{}● RECORDING{}", RED, RESET));
        }
        if self.visible.contains(&Indicator::Busy) {
            states.push(format!("{}… BUSY{}", YELLOW, RESET));
        }
        let state = if states.is_empty() {
            "--".to_string()
        } else {
            states.join("  ")
        };

        let mut alerts = Vec::new();
        if self.visible.contains(&Indicator::ConnectionFailed) {
            alerts.push(format!("{}waiting for recorder...{}", YELLOW, RESET));
        }
        if self.visible.contains(&Indicator::UnknownError) {
            let message = self.text(TextField::ErrorMessage);
            if message.is_empty() {
                alerts.push(format!("{}recorder error{}", RED, RESET));
            } else {
                alerts.push(format!("{}recorder error: {}{}", RED, message, RESET));
            }
        }

        vec![
            format!("state:    {}", state),
            format!("time:     {}", self.text(TextField::Time)),
            format!("file:     {}", self.text(TextField::Filename)),
            format!(
                "controls: {} {}   (r)ecord  (s)top  (q)uit",
                self.control_label(Control::Record, "record"),
                self.control_label(Control::Stop, "stop"),
            ),
            alerts.join("  "),
        ]
    }
}

impl UiSink for TermUi {
    fn show(&mut self, indicator: Indicator) {
        self.visible.insert(indicator);
    }

    fn hide(&mut self, indicator: Indicator) {
        self.visible.remove(&indicator);
    }

    fn enable(&mut self, control: Control) {
        self.enabled.insert(control);
    }

    fn disable(&mut self, control: Control) {
        self.enabled.remove(&control);
    }

    fn set_text(&mut self, field: TextField, text: &str) {
        self.texts.insert(field, text.to_string());
    }

    fn refresh(&mut self) {
        let lines = self.render_lines();

        let mut frame = String::new();
        if self.painted {
            // Move back over the previous frame and overwrite it in place
            frame.push_str(&format!("\x1b[{}A", lines.len()));
        }
        for line in &lines {
            frame.push_str("\r\x1b[2K");
            frame.push_str(line);
            frame.push('\n');
        }

        let mut out = std::io::stdout().lock();
        if out.write_all(frame.as_bytes()).and_then(|_| out.flush()).is_err() {
            tracing::debug!("Failed to repaint panel");
        }
        self.painted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_waiting_for_the_recorder() {
        let ui = TermUi::new();
        let lines = ui.render_lines();

        assert!(lines[4].contains("waiting for recorder"));
        assert!(lines[0].contains("--"));
    }

    #[test]
    fn renders_recording_snapshot() {
        let mut ui = TermUi::new();
        ui.hide(Indicator::ConnectionFailed);
        ui.show(Indicator::Recording);
        ui.enable(Control::Stop);
        ui.set_text(TextField::Time, "00:00:42");
        ui.set_text(TextField::Filename, "take1.mp3");

        let lines = ui.render_lines();
        assert!(lines[0].contains("RECORDING"));
        assert!(lines[1].contains("00:00:42"));
        assert!(lines[2].contains("take1.mp3"));
        assert!(lines[4].is_empty());
    }

    #[test]
    fn error_message_is_shown_with_the_error_indicator() {
        let mut ui = TermUi::new();
        ui.show(Indicator::UnknownError);
        ui.set_text(TextField::ErrorMessage, "timeout");

        let lines = ui.render_lines();
        assert!(lines[4].contains("recorder error: timeout"));
    }
}
