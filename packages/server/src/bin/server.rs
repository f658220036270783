//! Broadcast chat relay server.
//!
//! Every message a client sends is relayed to every connected client, newcomers
//! receive the retained history first.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin agora-server
//! cargo run --bin agora-server -- --host 0.0.0.0 --port 3000 --wordlist badwords.txt
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use agora_server::{
    infrastructure::wordlist::load_censor,
    ui::{Server, ServerConfig},
    usecase::{BinaryHistory, BroadcastHub, HubConfig},
};
use agora_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "agora-server")]
#[command(about = "Broadcast chat relay with history replay and word censoring", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,

    /// Directory holding index.html and static assets
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Newline-separated list of words to mask
    #[arg(long, default_value = "badwords.txt")]
    wordlist: PathBuf,

    /// Keep image frames in the replay history
    #[arg(long)]
    store_images: bool,

    /// Give up on a client whose socket write takes longer than this
    #[arg(long)]
    send_timeout_secs: Option<u64>,

    /// Do not read operator commands from stdin
    #[arg(long)]
    no_console: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // 1. Censor (a missing list disables masking)
    let censor = load_censor(&args.wordlist).await;

    // 2. Hub
    let hub_config = HubConfig {
        binary_history: if args.store_images {
            BinaryHistory::Retain
        } else {
            BinaryHistory::Skip
        },
    };
    let hub = Arc::new(BroadcastHub::new(censor, hub_config));

    // 3. Server
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        static_dir: args.static_dir,
        send_timeout: args.send_timeout_secs.map(Duration::from_secs),
        console: !args.no_console,
    };
    if let Err(e) = Server::new(hub, config).run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    // The console reader may still be parked in a blocking stdin read
    std::process::exit(0);
}
