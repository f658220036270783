//! Operator console.
//!
//! A reader task turns stdin lines into [`OperatorCommand`]s and sends them
//! over a channel; [`run_operator`] executes them against the hub.

use std::{str::FromStr, sync::Arc};

use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{Notify, mpsc},
    task::JoinHandle,
};

use crate::{
    domain::{Frame, SystemMessage},
    usecase::BroadcastHub,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Wipe the history and tell every client to wipe its display
    Clear,
    /// Shut the server down
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for OperatorCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "clear" => Ok(OperatorCommand::Clear),
            "exit" | "quit" => Ok(OperatorCommand::Exit),
            _ => Err(UnknownCommand(command)),
        }
    }
}

/// Spawn a task reading commands from stdin.
///
/// Unknown input, blank lines included, is reported and skipped. The task
/// ends at EOF or when the executor side of the channel is gone.
pub fn spawn_console_reader(commands: mpsc::Sender<OperatorCommand>) -> JoinHandle<()> {
    tokio::spawn(async move {
        println!("Type 'clear' to clear chat or 'exit' to quit.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    match line.parse::<OperatorCommand>() {
                        Ok(command) => {
                            if commands.send(command).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => println!("{}", e),
                    }
                }
                Ok(None) => {
                    tracing::debug!("Console input closed");
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to read console input: {}", e);
                    break;
                }
            }
        }
    })
}

/// Execute operator commands until the channel closes or `exit` arrives.
pub async fn run_operator(
    hub: Arc<BroadcastHub>,
    mut commands: mpsc::Receiver<OperatorCommand>,
    shutdown: Arc<Notify>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            OperatorCommand::Clear => clear_chat(&hub).await,
            OperatorCommand::Exit => {
                shutdown.notify_one();
                break;
            }
        }
    }
}

/// Clear the history, then announce it. The announcement is not stored.
pub async fn clear_chat(hub: &BroadcastHub) {
    hub.clear().await;
    hub.broadcast(Frame::text(SystemMessage::ClearedByServer.to_string()), false)
        .await;
}
