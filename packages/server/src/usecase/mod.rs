//! UseCase layer
//!
//! ドメイン層の部品（レジストリ・履歴・検閲）を組み合わせて、
//! 接続受付・ブロードキャスト・セッション処理を提供します。

pub mod broadcast_hub;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast_hub::{BinaryHistory, BroadcastHub, BroadcastReport, HubConfig};
pub use error::HubError;
pub use session::{SessionEnd, SessionLoop};
