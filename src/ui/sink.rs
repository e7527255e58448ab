/// Panel controls the user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Record,
    Stop,
}

/// Status indicators shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Recorder is idle and ready
    Stopped,
    /// Recorder is capturing audio
    Recording,
    /// Recorder is busy finishing a file
    Busy,
    /// The recorder reported an error, or a poll failed
    UnknownError,
    /// No successful poll has reached the recorder yet
    ConnectionFailed,
}

/// Text fields shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Time,
    Filename,
    ErrorMessage,
}

/// Trait for the panel presentation layer
///
/// The status poller writes the panel exclusively through this interface
/// and never reads it back, so implementations only need to track the
/// latest value per widget. `refresh` is called once per poll cycle after
/// all updates for that cycle have been applied.
pub trait UiSink: Send {
    fn show(&mut self, indicator: Indicator);
    fn hide(&mut self, indicator: Indicator);
    fn enable(&mut self, control: Control);
    fn disable(&mut self, control: Control);
    fn set_text(&mut self, field: TextField, text: &str);

    /// Flush this cycle's updates to the user
    fn refresh(&mut self);
}
