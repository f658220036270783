//! Terminal chat client for the Agora relay.
//!
//! Sends each line typed at the prompt and prints everything the relay
//! broadcasts. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-client
//! cargo run --bin agora-client -- --url ws://192.168.1.10:8000/ws
//! ```

use clap::Parser;

use agora_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "agora-client")]
#[command(about = "Terminal client for the Agora broadcast chat relay", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = agora_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }

    // The readline thread may still be waiting for a line
    std::process::exit(0);
}
