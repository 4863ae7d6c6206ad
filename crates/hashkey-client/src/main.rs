use std::io;
use std::time::Duration;

use clap::Parser;
use hashkey_client::{ClientConfig, DEFAULT_ENDPOINT, KeyBoard, KeyClient};

#[derive(Parser, Debug)]
#[command(name = "hashkey-client", about = "Fetch and display a hash key set")]
struct Args {
    /// Base URL of the key server.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on the server after this many milliseconds.
    #[arg(short, long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Request the keys of a specific batch instead of a random set.
    #[arg(short, long)]
    batch: Option<String>,

    /// Reload and redisplay the keys every N seconds (at least 1).
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Enable basic logging; set RUST_LOG=info for visibility.
    env_logger::init();

    let args = Args::parse();
    let client = KeyClient::new(ClientConfig {
        endpoint: args.endpoint,
        timeout: Duration::from_millis(args.timeout_ms),
    })
    .expect("Failed to create HTTP client");

    let mut board = KeyBoard::new();
    loop {
        match board.load(&client, args.batch.as_deref()).await {
            Ok(_) => {
                if let Err(e) = board.render(&mut io::stdout().lock()) {
                    log::error!("Failed to write keys: {}", e);
                }
            }
            Err(e) => log::error!("Failed to load keys: {}", e),
        }

        let Some(secs) = args.refresh_secs else {
            break;
        };
        tokio::time::sleep(Duration::from_secs(secs)).await;
        log::info!("Refreshing keys...");
    }
}
