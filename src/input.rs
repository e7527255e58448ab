use crate::messages::PanelCommand;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Read panel commands from stdin.
///
/// Parses each line into a `PanelCommand` and forwards it on the channel.
/// Exits when stdin closes or the receiver is gone.
pub async fn read_commands(tx: mpsc::Sender<PanelCommand>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(cmd) => {
                tracing::debug!("Input command: {:?}", cmd);
                if tx.send(cmd).await.is_err() {
                    break;
                }
            }
            None => {
                if !line.trim().is_empty() {
                    tracing::warn!("Unrecognized command: {}", line.trim());
                }
            }
        }
    }

    Ok(())
}

pub fn parse_command(line: &str) -> Option<PanelCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "record" | "start" => Some(PanelCommand::StartRecording),
        "s" | "stop" => Some(PanelCommand::StopRecording),
        "y" | "yes" => Some(PanelCommand::Confirm),
        "n" | "no" => Some(PanelCommand::Cancel),
        "q" | "quit" | "exit" => Some(PanelCommand::Quit),
        _ => None,
    }
}
