//! Payload types.
//!
//! Inbound data is classified once into a [`Payload`] at the transport
//! boundary; everything downstream matches on the variant instead of sniffing
//! string prefixes again. Outbound data travels as a [`Frame`].

use agora_shared::protocol;
use bytes::Bytes;

/// A unit of outbound data, also the element type of the history buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Bytes),
}

impl Frame {
    pub fn text(text: impl Into<String>) -> Self {
        Frame::Text(text.into())
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Frame::Binary(_))
    }

    /// Text content, `None` for binary frames.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Frame::Text(text) => Some(text),
            Frame::Binary(_) => None,
        }
    }
}

/// Reserved control tokens a client may send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlSignal {
    Typing,
    StopTyping,
    /// Clients cannot clear server history; the request is discarded.
    Clear,
    /// Any other `__`-prefixed token.
    Unknown(String),
}

impl ControlSignal {
    fn from_token(token: &str) -> Self {
        match token {
            protocol::TYPING => ControlSignal::Typing,
            protocol::STOP_TYPING => ControlSignal::StopTyping,
            protocol::CLEAR => ControlSignal::Clear,
            other => ControlSignal::Unknown(other.to_string()),
        }
    }
}

/// An inbound payload after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Ordinary chat text, already trimmed and non-empty
    Text(String),
    Binary(Bytes),
    Control(ControlSignal),
}

impl Payload {
    /// Classify a text frame.
    ///
    /// Returns `None` for empty or whitespace-only text.
    pub fn from_text(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        if protocol::is_reserved(text) {
            return Some(Payload::Control(ControlSignal::from_token(text)));
        }
        Some(Payload::Text(text.to_string()))
    }

    /// Classify a binary frame. Empty frames are dropped.
    pub fn from_binary(data: Bytes) -> Option<Self> {
        if data.is_empty() {
            None
        } else {
            Some(Payload::Binary(data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_trims_ordinary_text() {
        // テスト項目: 通常のテキストは前後の空白が除去されて Text になる
        // when (操作):
        let payload = Payload::from_text("  hello world \n");

        // then (期待する結果):
        assert_eq!(payload, Some(Payload::Text("hello world".to_string())));
    }

    #[test]
    fn test_from_text_drops_blank_input() {
        // テスト項目: 空文字列・空白のみの入力は破棄される
        assert_eq!(Payload::from_text(""), None);
        assert_eq!(Payload::from_text("   \t\n"), None);
    }

    #[test]
    fn test_from_text_classifies_control_tokens() {
        // テスト項目: 予約トークンが対応する ControlSignal に分類される
        // given (前提条件):
        let cases = [
            ("__typing__", ControlSignal::Typing),
            (" __stoptyping__ ", ControlSignal::StopTyping),
            ("__clear__", ControlSignal::Clear),
            ("__kick__ 3", ControlSignal::Unknown("__kick__ 3".to_string())),
        ];

        // when (操作) / then (期待する結果):
        for (input, expected) in cases {
            assert_eq!(
                Payload::from_text(input),
                Some(Payload::Control(expected)),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_control_tokens_are_case_sensitive() {
        // テスト項目: 大文字の予約トークンは Unknown として扱われる
        assert_eq!(
            Payload::from_text("__TYPING__"),
            Some(Payload::Control(ControlSignal::Unknown(
                "__TYPING__".to_string()
            )))
        );
    }

    #[test]
    fn test_from_binary() {
        // テスト項目: 空のバイナリは破棄され、それ以外は Binary になる
        assert_eq!(Payload::from_binary(Bytes::new()), None);
        assert_eq!(
            Payload::from_binary(Bytes::from_static(b"\x89PNG")),
            Some(Payload::Binary(Bytes::from_static(b"\x89PNG")))
        );
    }
}
