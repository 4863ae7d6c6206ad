use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use hashkey_server::configuration::ServerConfig;
use hashkey_server::metric::Metrics;
use hashkey_server::server::Server;

#[derive(Parser, Debug)]
#[command(name = "hashkey-server", about = "Serve generated hash key sets over HTTP")]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "conf.yaml")]
    conf: PathBuf,

    /// Override the listen address from the configuration file.
    #[arg(short, long)]
    listen: Option<String>,
}

fn main() {
    // Enable basic logging; set RUST_LOG=info for visibility.
    env_logger::init();

    let args = Args::parse();

    let mut server_conf = ServerConfig::load(&args.conf).expect("Failed to load server config");
    if let Some(listen) = args.listen {
        server_conf.listen = listen;
    }

    let mut server = Server::new(None).expect("Failed to create server");
    server
        .bootstrap(server_conf, Arc::new(Metrics::default()))
        .expect("Failed to bootstrap server");

    server.run_forever();
}
