/// Commands parsed from panel input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Start recording on the remote service
    StartRecording,
    /// Stop recording (may require confirmation first)
    StopRecording,
    /// Confirm a pending stop
    Confirm,
    /// Cancel a pending stop
    Cancel,
    /// Exit the panel
    Quit,
}
