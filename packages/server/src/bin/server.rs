//! Collaborative whiteboard server.
//!
//! Peers join a room over WebSocket, receive the room's history and then
//! exchange drawing events with every other peer in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-server
//! cargo run --bin kokuban-server -- --host 0.0.0.0 --port 3000 --static-dir public
//! ```

use std::{num::NonZeroUsize, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use kokuban_server::{
    infrastructure::{message_pusher::DEFAULT_QUEUE_CAPACITY, repository::InMemoryRoomRegistry},
    ui::{Server, ServerConfig},
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        SubmitEventUseCase,
    },
};
use kokuban_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "kokuban-server")]
#[command(about = "Collaborative whiteboard server with per-room history replay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Outbound queue capacity per connection; peers that fall this far behind are dropped
    #[arg(long, default_value_t = NonZeroUsize::new(DEFAULT_QUEUE_CAPACITY).unwrap_or(NonZeroUsize::MIN))]
    queue_capacity: NonZeroUsize,

    /// Seconds a single socket write may take before the peer is dropped
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    write_timeout_secs: u64,

    /// Directory of static assets to serve (e.g., the whiteboard frontend)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Origin allowed to make cross-origin requests (repeatable)
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            queue_capacity: args.queue_capacity,
            write_timeout: Duration::from_secs(args.write_timeout_secs),
            static_dir: args.static_dir,
            allowed_origins: args.allowed_origins,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory room map)
    let registry = Arc::new(InMemoryRoomRegistry::new(Arc::new(SystemClock)));

    // 2. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let submit_event_usecase = Arc::new(SubmitEventUseCase::new());
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(registry));

    // 3. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        submit_event_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        args.into(),
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
