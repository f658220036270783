//! WebSocket client session management.

use std::time::{Duration, Instant};

use agora_shared::{protocol, time::get_local_timestamp};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::error::ClientError;

use super::{
    domain::{ServerFrame, UserInput, classify_frame, parse_input},
    formatter::MessageFormatter,
    typing::TypingState,
    ui::{PROMPT, clear_screen, redisplay_prompt},
};

/// How often stale typing notices are swept
const TYPING_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The thread outlives individual sessions so that reconnecting does not
/// start a second reader on the same terminal. The channel closes on Ctrl+C
/// or Ctrl+D.
pub fn spawn_input_thread() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one WebSocket session
///
/// Returns `Ok` when the user quits, `Err` when the connection fails or drops.
pub async fn run_client_session(
    url: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nType messages and press Enter to send. Commands: /image <path>, /typing, /stoptyping, /quit\n"
    );

    let (mut write, read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(receive_frames(read));

    // If either side completes, stop the other
    tokio::select! {
        read_result = &mut read_task => {
            let reason = read_result
                .unwrap_or_else(|e| format!("reader task failed: {}", e));
            Err(ClientError::ConnectionLost(reason))
        }
        write_result = forward_input(&mut write, input) => {
            read_task.abort();
            write_result
        }
    }
}

/// Send user input until `/quit` or the input closes.
async fn forward_input<W>(
    write: &mut W,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError>
where
    W: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    while let Some(line) = input.recv().await {
        let message = match parse_input(&line) {
            None => continue,
            Some(UserInput::Quit) => {
                write.send(Message::Close(None)).await.ok();
                return Ok(());
            }
            Some(UserInput::Text(text)) => Message::text(text),
            Some(UserInput::Typing) => Message::text(protocol::TYPING),
            Some(UserInput::StopTyping) => Message::text(protocol::STOP_TYPING),
            Some(UserInput::Image(path)) => match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    print!("{}", MessageFormatter::format_sent_image(bytes.len()));
                    Message::binary(bytes)
                }
                Err(e) => {
                    println!("Failed to read {}: {}", path.display(), e);
                    redisplay_prompt();
                    continue;
                }
            },
        };

        write
            .send(message)
            .await
            .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;
    }

    // Ctrl+C / Ctrl+D
    write.send(Message::Close(None)).await.ok();
    Ok(())
}

/// Display incoming frames until the connection ends; returns the reason.
async fn receive_frames<R>(mut read: R) -> String
where
    R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    let mut typing = TypingState::default();
    let mut sweep = tokio::time::interval(TYPING_SWEEP_INTERVAL);

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => show_text(text.as_str(), &mut typing),
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return "server closed the connection".to_string();
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return e.to_string();
                }
                Some(Ok(_)) => {}
            },
            _ = sweep.tick() => {
                if typing.expire(Instant::now()) {
                    show_typing(&typing);
                }
            }
        }
    }
}

fn show_text(text: &str, typing: &mut TypingState) {
    match classify_frame(text) {
        ServerFrame::Clear => {
            typing.clear();
            clear_screen();
        }
        ServerFrame::Typing(identity) => {
            typing.start(identity, Instant::now());
            show_typing(typing);
        }
        ServerFrame::StopTyping(identity) => {
            if typing.stop(identity) {
                show_typing(typing);
            }
        }
        ServerFrame::Line(line) => {
            print!(
                "{}",
                MessageFormatter::format_line(&line, get_local_timestamp())
            );
            redisplay_prompt();
        }
    }
}

fn show_typing(typing: &TypingState) {
    match typing.indicator() {
        Some(indicator) => print!("{}", MessageFormatter::format_typing(&indicator)),
        None => println!(),
    }
    redisplay_prompt();
}
