//! Reserved control vocabulary of the relay protocol.
//!
//! Frames are plain text. Tokens starting with [`RESERVED_PREFIX`] carry
//! protocol metadata instead of chat content and are matched case-sensitively.

/// Prefix shared by every control token.
pub const RESERVED_PREFIX: &str = "__";

/// Sent by a client while its user is typing.
/// Relayed by the server as `__typing__:<id>`.
pub const TYPING: &str = "__typing__";

/// Sent by a client when its user stopped typing.
/// Relayed by the server as `__stoptyping__:<id>`.
pub const STOP_TYPING: &str = "__stoptyping__";

/// Sent by the server only: clients wipe their local display.
pub const CLEAR: &str = "__clear__";

/// Separator between a relayed typing token and the sender identity.
pub const TAG_SEPARATOR: char = ':';

/// Returns `true` if `text` is a control token rather than chat content.
pub fn is_reserved(text: &str) -> bool {
    text.starts_with(RESERVED_PREFIX)
}

/// Build a typing notice tagged with the sender identity, e.g. `__typing__:2`.
pub fn tagged(token: &str, identity: u64) -> String {
    format!("{token}{TAG_SEPARATOR}{identity}")
}

/// Split a tagged notice into its token and identity.
///
/// Returns `None` if the text is not `<token>:<number>`.
pub fn split_tagged(text: &str) -> Option<(&str, u64)> {
    let (token, identity) = text.split_once(TAG_SEPARATOR)?;
    let identity = identity.parse().ok()?;
    Some((token, identity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_reserved() {
        // テスト項目: `__` で始まるトークンのみ予約語と判定される
        // given (前提条件):
        let inputs = [
            (TYPING, true),
            (CLEAR, true),
            ("__anything", true),
            ("_single", false),
            ("hello __typing__", false),
        ];

        // when (操作) / then (期待する結果):
        for (input, expected) in inputs {
            assert_eq!(is_reserved(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_tagged_and_split() {
        // テスト項目: タグ付き通知を生成し、元のトークンと ID に分解できる
        // given (前提条件):
        let notice = tagged(STOP_TYPING, 42);

        // when (操作):
        let parsed = split_tagged(&notice);

        // then (期待する結果):
        assert_eq!(notice, "__stoptyping__:42");
        assert_eq!(parsed, Some((STOP_TYPING, 42)));
    }

    #[test]
    fn test_split_tagged_rejects_non_numeric_identity() {
        // テスト項目: ID 部分が数値でない場合は None が返される
        // when (操作) / then (期待する結果):
        assert_eq!(split_tagged("__typing__:alice"), None);
        assert_eq!(split_tagged("__typing__"), None);
    }
}
