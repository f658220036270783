//! UseCase: ブロードキャストハブ
//!
//! ## 責務
//!
//! - 接続の受付（ID 割り当て、履歴の再送）
//! - ブロードキャスト（検閲、履歴への保存、全接続への配信、失敗した接続の削除）
//! - 履歴のクリア
//!
//! ## 並行性
//!
//! レジストリと履歴は 1 つのロックで保護されます。各操作は
//! 「保存 → スナップショット → 送信 → 削除」をロック内で完結させます。
//! `Connection::send` は各接続の送信キューへの投入のみでネットワーク I/O を
//! 待たないため、ロックを保持したまま配信しても遅いクライアントに引きずられません。
//! これにより、新規接続への履歴再送が並行するブロードキャストより必ず先に届きます。

use std::sync::Arc;

use agora_shared::protocol;
use tokio::sync::Mutex;

use crate::domain::{Censor, Connection, ConnectionRegistry, Frame, HistoryBuffer, Identity};

use super::error::HubError;

/// バイナリ（画像）フレームを履歴に残すかどうか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinaryHistory {
    /// 配信のみ行い、履歴には残さない
    #[default]
    Skip,
    /// テキストと同じ履歴に残す（上限もテキストと共有）
    Retain,
}

/// BroadcastHub の設定
#[derive(Debug, Clone, Copy, Default)]
pub struct HubConfig {
    pub binary_history: BinaryHistory,
}

/// 1 回の配信の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 配信に成功した接続数
    pub delivered: usize,
    /// 送信に失敗して削除された接続
    pub pruned: Vec<Identity>,
}

/// ロックで保護される共有状態
struct HubState {
    registry: ConnectionRegistry,
    history: HistoryBuffer,
}

/// 接続管理とブロードキャストのユースケース
pub struct BroadcastHub {
    state: Mutex<HubState>,
    /// 起動時に読み込まれ、以降は変更されない
    censor: Censor,
    config: HubConfig,
}

impl BroadcastHub {
    /// 新しい BroadcastHub を作成
    pub fn new(censor: Censor, config: HubConfig) -> Self {
        Self::with_history(censor, config, HistoryBuffer::new())
    }

    /// 履歴バッファを指定して BroadcastHub を作成
    pub fn with_history(censor: Censor, config: HubConfig, history: HistoryBuffer) -> Self {
        Self {
            state: Mutex::new(HubState {
                registry: ConnectionRegistry::new(),
                history,
            }),
            censor,
            config,
        }
    }

    /// 接続を受け付ける
    ///
    /// ID を割り当てて登録し、同じロック区間内で履歴全体をこの接続にだけ再送する。
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 割り当てられた ID
    /// * `Err(HubError::ReplayFailed)` - 再送に失敗した（接続は登録解除済み）
    pub async fn accept(&self, connection: Arc<dyn Connection>) -> Result<Identity, HubError> {
        let mut state = self.state.lock().await;
        let identity = state.registry.register(Arc::clone(&connection));

        let entries = state.history.replay();
        let replayed = entries.len();
        for entry in entries {
            if let Err(reason) = connection.send(entry) {
                state.registry.unregister(&identity);
                tracing::warn!("History replay to #{} failed: {}", identity, reason);
                return Err(HubError::ReplayFailed { identity, reason });
            }
        }

        tracing::debug!("Replayed {} history entries to #{}", replayed, identity);
        Ok(identity)
    }

    /// 全ての接続にフレームを配信する（送信者を含む）
    ///
    /// テキストは検閲してから配信する。`store` が true の場合は検閲後の内容を
    /// 履歴に追加する。バイナリは検閲せず、`BinaryHistory::Retain` のときだけ保存する。
    pub async fn broadcast(&self, frame: Frame, store: bool) -> BroadcastReport {
        let frame = match frame {
            Frame::Text(text) => Frame::Text(self.censor.apply(&text).into_owned()),
            binary @ Frame::Binary(_) => binary,
        };

        let mut state = self.state.lock().await;
        if store && self.retains(&frame) {
            let evicted = state.history.append(frame.clone());
            if evicted > 0 {
                tracing::debug!("Evicted {} oldest history entries", evicted);
            }
        }

        fan_out(&mut state, &frame)
    }

    /// 制御メッセージ（入力中通知など）を配信する
    ///
    /// 検閲も保存も行わない。
    pub async fn broadcast_control(&self, text: String) -> BroadcastReport {
        let mut state = self.state.lock().await;
        fan_out(&mut state, &Frame::Text(text))
    }

    /// 履歴を空にし、全ての接続に `__clear__` を送る
    ///
    /// 送信失敗はベストエフォートとして扱い、失敗した接続は削除する。
    pub async fn clear(&self) -> BroadcastReport {
        let mut state = self.state.lock().await;
        state.history.clear();
        tracing::info!("History cleared");
        fan_out(&mut state, &Frame::text(protocol::CLEAR))
    }

    /// 接続を登録解除する
    ///
    /// 既に削除されていれば `None`。切断と送信失敗による削除のどちらが先でも、
    /// `Some` を受け取るのは最初の 1 回だけ。
    pub async fn disconnect(&self, identity: &Identity) -> Option<Identity> {
        let mut state = self.state.lock().await;
        state.registry.unregister(identity)
    }

    /// 現在の履歴（到着順）
    pub async fn history(&self) -> Vec<Frame> {
        let state = self.state.lock().await;
        state.history.replay()
    }

    /// 接続中の数
    pub async fn connection_count(&self) -> usize {
        let state = self.state.lock().await;
        state.registry.len()
    }

    fn retains(&self, frame: &Frame) -> bool {
        match frame {
            Frame::Text(_) => true,
            Frame::Binary(_) => self.config.binary_history == BinaryHistory::Retain,
        }
    }
}

/// スナップショットの全接続に送信し、失敗した接続を最後にまとめて削除する
fn fan_out(state: &mut HubState, frame: &Frame) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for (identity, connection) in state.registry.snapshot() {
        match connection.send(frame.clone()) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!("Failed to push frame to #{}: {}", identity, e);
                report.pruned.push(identity);
            }
        }
    }

    for identity in &report.pruned {
        if state.registry.unregister(identity).is_some() {
            tracing::info!("Pruned dead connection #{}", identity);
        }
    }

    report
}
