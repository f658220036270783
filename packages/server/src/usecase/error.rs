//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{Identity, SendError};

/// BroadcastHub の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    /// 接続直後の履歴再送に失敗した（接続は登録解除済み）
    #[error("history replay to #{identity} failed: {reason}")]
    ReplayFailed {
        identity: Identity,
        reason: SendError,
    },
}
