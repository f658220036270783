//! Conversion logic between DTOs and domain types.

use crate::domain::Frame;
use crate::infrastructure::dto::http::{HistoryEntryDto, PostMessageRequest};

// ========================================
// Domain → DTO
// ========================================

impl From<&Frame> for HistoryEntryDto {
    fn from(frame: &Frame) -> Self {
        match frame {
            Frame::Text(content) => HistoryEntryDto::Text {
                content: content.clone(),
            },
            Frame::Binary(data) => HistoryEntryDto::Binary { size: data.len() },
        }
    }
}

// ========================================
// DTO → Domain
// ========================================

impl PostMessageRequest {
    /// Trimmed `(sender, text)` if both are present and non-empty.
    pub fn validate(&self) -> Option<(&str, &str)> {
        let sender = self.sender.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let text = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        Some((sender, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_frame_to_history_entry_dto() {
        // テスト項目: テキストは内容、バイナリはサイズとして変換される
        // given (前提条件):
        let text = Frame::text("#1: hi");
        let binary = Frame::Binary(Bytes::from_static(b"abcd"));

        // when (操作):
        let text_dto = HistoryEntryDto::from(&text);
        let binary_dto = HistoryEntryDto::from(&binary);

        // then (期待する結果):
        assert_eq!(
            text_dto,
            HistoryEntryDto::Text {
                content: "#1: hi".to_string()
            }
        );
        assert_eq!(binary_dto, HistoryEntryDto::Binary { size: 4 });
        assert_eq!(
            serde_json::to_value(&binary_dto).unwrap(),
            serde_json::json!({"kind": "binary", "size": 4})
        );
    }

    #[test]
    fn test_validate_requires_sender_and_text() {
        // テスト項目: sender と text の両方が空でない場合のみ受け付ける
        // given (前提条件):
        let request = |sender: Option<&str>, text: Option<&str>| PostMessageRequest {
            sender: sender.map(str::to_string),
            text: text.map(str::to_string),
        };

        // when (操作) / then (期待する結果):
        assert_eq!(
            request(Some(" bot "), Some(" hi ")).validate(),
            Some(("bot", "hi"))
        );
        assert_eq!(request(None, Some("hi")).validate(), None);
        assert_eq!(request(Some("bot"), None).validate(), None);
        assert_eq!(request(Some("bot"), Some("   ")).validate(), None);
    }
}
