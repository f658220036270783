//! UseCase: 接続ごとのセッション処理
//!
//! 1 つの接続について `JOINING -> ACTIVE -> CLOSED` を進めます。
//!
//! - `join`: BroadcastHub に接続を受け付けさせ、参加メッセージを配信する
//! - `serve`: 切断されるまで受信したペイロードを分類し、BroadcastHub に渡す
//! - `close`: 登録解除し、最初に解除できた場合だけ退出メッセージを配信する
//!
//! トランスポート層は各フェーズを個別に呼び出せます（送信側タスクの終了を
//! `serve` と並べて待つため）。テストやシンプルな利用では `run` を使います。

use std::sync::Arc;

use agora_shared::protocol;

use crate::domain::{
    Connection, ControlSignal, Frame, Identity, Inbound, InboundSource, Payload, SystemMessage,
    format_user_message,
};

use super::{broadcast_hub::BroadcastHub, error::HubError};

/// セッションが終了した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// クライアントが正常に切断した
    Disconnected,
    /// 読み込みエラー、または送信側の異常終了
    Failed,
}

impl SessionEnd {
    fn announcement(self, identity: Identity) -> SystemMessage {
        match self {
            SessionEnd::Disconnected => SystemMessage::Left(identity),
            SessionEnd::Failed => SystemMessage::LeftDueToError(identity),
        }
    }
}

/// 接続ごとのセッションループ
pub struct SessionLoop {
    hub: Arc<BroadcastHub>,
}

impl SessionLoop {
    /// 新しい SessionLoop を作成
    pub fn new(hub: Arc<BroadcastHub>) -> Self {
        Self { hub }
    }

    /// JOINING: 接続を受け付け、`** #<id> joined **` を配信する
    pub async fn join(&self, connection: Arc<dyn Connection>) -> Result<Identity, HubError> {
        let identity = self.hub.accept(connection).await?;
        tracing::info!("#{} joined", identity);

        self.hub
            .broadcast(Frame::text(SystemMessage::Joined(identity).to_string()), true)
            .await;
        Ok(identity)
    }

    /// ACTIVE: 切断またはエラーまで受信を続ける
    pub async fn serve<S>(&self, identity: Identity, source: &mut S) -> SessionEnd
    where
        S: InboundSource + ?Sized,
    {
        loop {
            let payload = match source.receive().await {
                Inbound::Text(text) => Payload::from_text(&text),
                Inbound::Binary(data) => Payload::from_binary(data),
                Inbound::Closed => {
                    tracing::info!("#{} closed the connection", identity);
                    return SessionEnd::Disconnected;
                }
                Inbound::Failed(reason) => {
                    tracing::warn!("Read from #{} failed: {}", identity, reason);
                    return SessionEnd::Failed;
                }
            };

            match payload {
                Some(payload) => self.dispatch(identity, payload).await,
                None => tracing::debug!("Dropped empty payload from #{}", identity),
            }
        }
    }

    /// CLOSED: 登録解除し、解除できた場合は退出メッセージを配信する
    ///
    /// # Returns
    ///
    /// 退出メッセージを配信した場合 `true`（既に削除済みなら `false`）
    pub async fn close(&self, identity: Identity, end: SessionEnd) -> bool {
        match self.hub.disconnect(&identity).await {
            Some(left) => {
                tracing::info!("#{} left ({:?})", left, end);
                self.hub
                    .broadcast(Frame::text(end.announcement(left).to_string()), true)
                    .await;
                true
            }
            None => {
                tracing::debug!("#{} was already removed, skipping announcement", identity);
                false
            }
        }
    }

    /// join → serve → close を順に実行する
    ///
    /// 受付に失敗した場合は退出メッセージを出さずに `None` を返す。
    pub async fn run<S>(
        &self,
        connection: Arc<dyn Connection>,
        source: &mut S,
    ) -> Option<(Identity, SessionEnd)>
    where
        S: InboundSource + ?Sized,
    {
        let identity = match self.join(connection).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("Failed to join: {}", e);
                return None;
            }
        };

        let end = self.serve(identity, source).await;
        self.close(identity, end).await;
        Some((identity, end))
    }

    async fn dispatch(&self, identity: Identity, payload: Payload) {
        match payload {
            Payload::Text(text) => {
                tracing::debug!("#{} sent text ({} bytes)", identity, text.len());
                self.hub
                    .broadcast(Frame::Text(format_user_message(identity, &text)), true)
                    .await;
            }
            Payload::Binary(data) => {
                tracing::debug!("#{} sent binary ({} bytes)", identity, data.len());
                self.hub.broadcast(Frame::Binary(data), true).await;
            }
            Payload::Control(ControlSignal::Typing) => {
                self.hub
                    .broadcast_control(protocol::tagged(protocol::TYPING, identity.value()))
                    .await;
            }
            Payload::Control(ControlSignal::StopTyping) => {
                self.hub
                    .broadcast_control(protocol::tagged(protocol::STOP_TYPING, identity.value()))
                    .await;
            }
            Payload::Control(ControlSignal::Clear) => {
                tracing::debug!("Ignored clear request from #{}", identity);
            }
            Payload::Control(ControlSignal::Unknown(token)) => {
                tracing::debug!("Ignored unknown control token from #{}: {}", identity, token);
            }
        }
    }
}
