//! Who is typing right now.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

/// A typing notice without a matching stop is dropped after this long.
pub const TYPING_TTL: Duration = Duration::from_secs(5);

/// Typing participants keyed by identity, with the time they were last seen typing
#[derive(Debug)]
pub struct TypingState {
    typing: BTreeMap<u64, Instant>,
    ttl: Duration,
}

impl TypingState {
    pub fn new(ttl: Duration) -> Self {
        Self {
            typing: BTreeMap::new(),
            ttl,
        }
    }

    pub fn start(&mut self, identity: u64, now: Instant) {
        self.typing.insert(identity, now);
    }

    /// Returns `true` if the identity was typing
    pub fn stop(&mut self, identity: u64) -> bool {
        self.typing.remove(&identity).is_some()
    }

    pub fn clear(&mut self) {
        self.typing.clear();
    }

    /// Drop stale entries. Returns `true` if anything was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.typing.len();
        let ttl = self.ttl;
        self.typing
            .retain(|_, since| now.saturating_duration_since(*since) < ttl);
        self.typing.len() != before
    }

    /// Identities currently typing, ascending
    pub fn active(&self) -> Vec<u64> {
        self.typing.keys().copied().collect()
    }

    /// `#2, #3 typing...`, or `None` when nobody is typing
    pub fn indicator(&self) -> Option<String> {
        let active = self.active();
        if active.is_empty() {
            return None;
        }
        let names: Vec<String> = active.iter().map(|id| format!("#{}", id)).collect();
        Some(format!("{} typing...", names.join(", ")))
    }
}

impl Default for TypingState {
    fn default() -> Self {
        Self::new(TYPING_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_lists_typing_identities() {
        // テスト項目: 入力中の参加者が ID 順に表示される
        // given (前提条件):
        let now = Instant::now();
        let mut state = TypingState::default();

        // when (操作):
        state.start(3, now);
        state.start(2, now);

        // then (期待する結果):
        assert_eq!(state.active(), vec![2, 3]);
        assert_eq!(state.indicator(), Some("#2, #3 typing...".to_string()));
    }

    #[test]
    fn test_stop_removes_identity() {
        // テスト項目: 入力終了通知で表示から消える
        // given (前提条件):
        let now = Instant::now();
        let mut state = TypingState::default();
        state.start(1, now);

        // when (操作):
        let removed = state.stop(1);

        // then (期待する結果):
        assert!(removed);
        assert!(!state.stop(1));
        assert_eq!(state.indicator(), None);
    }

    #[test]
    fn test_expire_drops_stale_entries() {
        // テスト項目: 一定時間更新のない入力中表示は期限切れで消える
        // given (前提条件):
        let start = Instant::now();
        let mut state = TypingState::new(Duration::from_secs(5));
        state.start(1, start);
        state.start(2, start + Duration::from_secs(3));

        // when (操作):
        let changed = state.expire(start + Duration::from_secs(6));

        // then (期待する結果):
        assert!(changed);
        assert_eq!(state.active(), vec![2]);
        assert!(!state.expire(start + Duration::from_secs(7)));
    }

    #[test]
    fn test_repeated_typing_refreshes_deadline() {
        // テスト項目: 入力中通知を再度受け取ると期限が延びる
        // given (前提条件):
        let start = Instant::now();
        let mut state = TypingState::new(Duration::from_secs(5));
        state.start(1, start);

        // when (操作):
        state.start(1, start + Duration::from_secs(4));
        state.expire(start + Duration::from_secs(6));

        // then (期待する結果):
        assert_eq!(state.active(), vec![1]);
    }
}
