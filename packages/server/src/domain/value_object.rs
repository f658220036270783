//! Value objects.

use std::fmt;

/// Server-assigned number naming one connection for its lifetime.
///
/// Identities start at 1, increase strictly in assignment order and are never
/// reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(u64);

impl Identity {
    /// The first identity handed out by a fresh registry.
    pub const FIRST: Identity = Identity(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identity assigned right after this one.
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Identity> for u64 {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_next_is_strictly_increasing() {
        // テスト項目: next() で得られる ID は常に元の ID より大きい
        // given (前提条件):
        let first = Identity::FIRST;

        // when (操作):
        let second = first.next();
        let third = second.next();

        // then (期待する結果):
        assert!(first < second && second < third);
        assert_eq!(third.value(), 3);
    }

    #[test]
    fn test_identity_display() {
        // テスト項目: Display は数値のみを出力する
        assert_eq!(Identity::new(7).to_string(), "7");
    }
}
