//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::path::PathBuf;

use agora_shared::protocol;

use crate::error::ClientError;

/// A line typed by the user, after command parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Plain chat text
    Text(String),
    /// `/image <path>`: send the file as a binary frame
    Image(PathBuf),
    /// `/typing`
    Typing,
    /// `/stoptyping`
    StopTyping,
    /// `/quit`
    Quit,
}

/// A text frame received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    Clear,
    Typing(u64),
    StopTyping(u64),
    /// Chat or system line to display as is
    Line(String),
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(current_attempt: u32, max_attempts: u32) -> bool {
    current_attempt < max_attempts
}

/// Number of consecutive failed attempts after a session ended with `error`.
///
/// A session that got connected before it failed starts a fresh series, so
/// only back-to-back connection failures count toward the limit.
pub fn next_reconnect_count(error: &ClientError, current_attempt: u32) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        ClientError::ConnectionError(_) => current_attempt + 1,
    }
}

/// Parse a line typed by the user.
///
/// Returns `None` for blank lines and for `/image` without a path.
pub fn parse_input(line: &str) -> Option<UserInput> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line {
        "/quit" => return Some(UserInput::Quit),
        "/typing" => return Some(UserInput::Typing),
        "/stoptyping" => return Some(UserInput::StopTyping),
        _ => {}
    }

    if let Some(path) = line.strip_prefix("/image") {
        // `/imagery` is chat text, not a command
        if path.is_empty() || path.starts_with(char::is_whitespace) {
            let path = path.trim();
            return (!path.is_empty()).then(|| UserInput::Image(PathBuf::from(path)));
        }
    }

    Some(UserInput::Text(line.to_string()))
}

/// Classify a text frame from the server.
pub fn classify_frame(text: &str) -> ServerFrame {
    if text == protocol::CLEAR {
        return ServerFrame::Clear;
    }

    match protocol::split_tagged(text) {
        Some((protocol::TYPING, identity)) => ServerFrame::Typing(identity),
        Some((protocol::STOP_TYPING, identity)) => ServerFrame::StopTyping(identity),
        _ => ServerFrame::Line(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let (current, max) = (3, 5);

        // when (操作):
        let result = should_attempt_reconnect(current, max);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let (current, max) = (5, 5);

        // when (操作):
        let result = should_attempt_reconnect(current, max);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_next_reconnect_count_after_failed_connect() {
        // テスト項目: 接続に失敗した場合は再接続回数が加算される
        // given (前提条件):
        let error = ClientError::ConnectionError("refused".to_string());

        // when (操作):
        let result = next_reconnect_count(&error, 3);

        // then (期待する結果):
        assert_eq!(result, 4);
    }

    #[test]
    fn test_next_reconnect_count_resets_after_connected_session() {
        // テスト項目: 一度接続できたセッションが切れた場合は再接続回数が 1 からやり直しになる
        // given (前提条件):
        let error = ClientError::ConnectionLost("reset".to_string());

        // when (操作):
        let result = next_reconnect_count(&error, 4);

        // then (期待する結果):
        assert_eq!(result, 1);
        assert!(should_attempt_reconnect(result, 5));
    }

    #[test]
    fn test_parse_input_commands() {
        // テスト項目: スラッシュコマンドが対応する入力に変換される
        // given (前提条件):
        let inputs = [
            ("/quit", UserInput::Quit),
            ("/typing", UserInput::Typing),
            ("  /stoptyping  ", UserInput::StopTyping),
            ("/image cat.png", UserInput::Image(PathBuf::from("cat.png"))),
        ];

        // when (操作) / then (期待する結果):
        for (line, expected) in inputs {
            assert_eq!(parse_input(line), Some(expected), "line: {line}");
        }
    }

    #[test]
    fn test_parse_input_text() {
        // テスト項目: コマンド以外の行はトリムされたテキストになる
        // given (前提条件):
        let line = "  hello there ";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert_eq!(result, Some(UserInput::Text("hello there".to_string())));
        assert_eq!(
            parse_input("/imagery is nice"),
            Some(UserInput::Text("/imagery is nice".to_string()))
        );
    }

    #[test]
    fn test_parse_input_ignored_lines() {
        // テスト項目: 空行とパス無しの /image は送信しない
        // given (前提条件):
        let lines = ["", "   ", "/image", "/image   "];

        // when (操作) / then (期待する結果):
        for line in lines {
            assert_eq!(parse_input(line), None, "line: {line:?}");
        }
    }

    #[test]
    fn test_classify_frame() {
        // テスト項目: サーバーからのフレームが制御通知と表示行に分類される
        // given (前提条件):
        let frames = [
            ("__clear__", ServerFrame::Clear),
            ("__typing__:2", ServerFrame::Typing(2)),
            ("__stoptyping__:13", ServerFrame::StopTyping(13)),
            ("#1: hi", ServerFrame::Line("#1: hi".to_string())),
            ("** #1 joined **", ServerFrame::Line("** #1 joined **".to_string())),
            ("__typing__:abc", ServerFrame::Line("__typing__:abc".to_string())),
        ];

        // when (操作) / then (期待する結果):
        for (text, expected) in frames {
            assert_eq!(classify_frame(text), expected, "text: {text}");
        }
    }
}
