//! Message formatting utilities for client display.

use agora_shared::time::timestamp_to_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat or system line
    ///
    /// # Arguments
    ///
    /// * `text` - The line as relayed by the server
    /// * `received_at` - Unix timestamp when the line arrived (milliseconds)
    pub fn format_line(text: &str, received_at: i64) -> String {
        format!("\n[{}] {}\n", timestamp_to_clock(received_at), text)
    }

    /// Format an image notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n[image: {} bytes]\n", byte_count)
    }

    /// Format the typing indicator line
    pub fn format_typing(indicator: &str) -> String {
        format!("\n... {}\n", indicator)
    }

    pub fn format_sent_image(byte_count: usize) -> String {
        format!("sent image ({} bytes)\n", byte_count)
    }
}
