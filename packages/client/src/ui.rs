//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "> ";

/// ANSI: erase the screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Wipe the terminal, used when the server clears the chat
pub fn clear_screen() {
    print!("{}", CLEAR_SCREEN);
    std::io::stdout().flush().ok();
}
