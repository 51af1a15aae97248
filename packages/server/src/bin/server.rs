//! Decision platform WebSocket server.
//!
//! Participants connect, register a display name, open rooms around a
//! decision problem, and exchange decisions in real time.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin quorum-server
//! cargo run --bin quorum-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use quorum_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    },
    ui::{AppState, Server},
};
use quorum_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "quorum-server")]
#[command(about = "Decision delegation platform server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Wire dependencies: repository, pusher, use cases, server.
    let repository = Arc::new(InMemorySessionRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let state = Arc::new(AppState::new(repository, message_pusher));

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
