//! WebSocket を使った Connection / InboundSource 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（容量 [`OUTBOUND_QUEUE_CAPACITY`] の `Sender<Frame>`）の管理
//! - 送信キューから WebSocket へ書き込む pusher loop
//! - WebSocket から受信したメッセージの `Inbound` への変換
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! `WebSocketConnection::send` はキューへの投入のみを行い、実際の書き込みは
//! pusher loop が担当します。pusher loop が終了するとキューの受信側が破棄され、
//! 以降の `send` は `SendError::Closed` になります（BroadcastHub が削除する）。
//! 書き込みが詰まってキューが満杯になった場合も `send` は待たずに
//! `SendError::Full` を返し、同様に削除されます。

use std::{fmt::Display, time::Duration};

use async_trait::async_trait;
use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::domain::{Connection, Frame, HISTORY_CAPACITY, Inbound, InboundSource, SendError};

/// 1 接続あたりの送信キューの容量
///
/// 参加時の履歴再送がまとめて入るよう、履歴の上限より大きくする。
pub const OUTBOUND_QUEUE_CAPACITY: usize = HISTORY_CAPACITY * 4;

/// WebSocket 接続の送信側
pub struct WebSocketConnection {
    sender: mpsc::Sender<Frame>,
}

impl WebSocketConnection {
    /// 送信キューを作成し、Connection と pusher loop 用の受信側を返す
    pub fn channel() -> (Self, mpsc::Receiver<Frame>) {
        Self::with_capacity(OUTBOUND_QUEUE_CAPACITY)
    }

    /// 容量を指定して送信キューを作成する
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl Connection for WebSocketConnection {
    fn send(&self, frame: Frame) -> Result<(), SendError> {
        self.sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }
}

/// 送信キューのフレームを WebSocket に書き込むタスクを起動する
///
/// `send_timeout` が指定された場合、1 回の書き込みがそれを超えるとタスクを終了する。
/// 指定がなければトランスポート自身がエラーを返すまで待つ。
///
/// # Returns
///
/// 起動したタスクの `JoinHandle`
pub fn pusher_loop<S>(
    mut receiver: mpsc::Receiver<Frame>,
    mut sink: S,
    send_timeout: Option<Duration>,
) -> JoinHandle<()>
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: Display + Send,
{
    tokio::spawn(async move {
        while let Some(frame) = receiver.recv().await {
            let message = into_message(frame);
            let result = match send_timeout {
                Some(limit) => match tokio::time::timeout(limit, sink.send(message)).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!("WebSocket write timed out after {:?}", limit);
                        break;
                    }
                },
                None => sink.send(message).await,
            };

            if let Err(e) = result {
                tracing::debug!("WebSocket write failed: {}", e);
                break;
            }
        }
    })
}

fn into_message(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.into()),
        Frame::Binary(data) => Message::Binary(data),
    }
}

/// WebSocket 接続の受信側
pub struct WebSocketInbound<S> {
    stream: S,
}

impl<S> WebSocketInbound<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<S, E> InboundSource for WebSocketInbound<S>
where
    S: Stream<Item = Result<Message, E>> + Unpin + Send,
    E: Display + Send,
{
    async fn receive(&mut self) -> Inbound {
        loop {
            let message = match self.stream.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Inbound::Failed(e.to_string()),
                None => return Inbound::Closed,
            };

            match message {
                Message::Text(text) => return Inbound::Text(text.as_str().to_owned()),
                Message::Binary(data) => return Inbound::Binary(data),
                Message::Close(_) => return Inbound::Closed,
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => continue,
            }
        }
    }
}
