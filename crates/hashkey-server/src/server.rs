use std::sync::Arc;

use hashkey::KeyGenerator;
use pingora::apps::http_app::HttpServer;
use pingora::prelude::*;
use pingora::server::RunArgs;
use pingora::server::Server as PingoraServer;
use pingora::server::configuration::Opt;
use pingora::services::listening::Service;

use crate::configuration::ServerConfig;
use crate::metric::Metrics;
use crate::response::ResponsePolicy;
use crate::service::KeyService;

pub struct Server {
    server: PingoraServer,
}

impl Server {
    pub fn new(opt: Option<Opt>) -> Result<Self> {
        let server = PingoraServer::new(opt)?;
        Ok(Server { server })
    }

    /// Register the key service on the address named in `server_conf`.
    pub fn bootstrap(&mut self, server_conf: ServerConfig, metrics: Arc<Metrics>) -> Result<()> {
        server_conf.validate().map_err(|e| {
            Error::explain(
                ErrorType::InternalError,
                format!("invalid server config: {e}"),
            )
        })?;

        self.server.bootstrap();

        let policy = ResponsePolicy {
            allow_origin: server_conf.allow_origin.clone(),
            cache_max_age_secs: server_conf.cache_max_age_secs,
        };
        let app = KeyService::new(KeyGenerator::new(), policy, metrics);

        let mut key_service = Service::new(
            "hash key service".to_string(),
            HttpServer::new_app(app),
        );
        key_service.add_tcp(&server_conf.listen);
        self.server.add_service(key_service);

        log::info!("Serving hash keys on {}", server_conf.listen);
        Ok(())
    }

    pub fn run_forever(self) {
        self.server.run_forever();
    }

    pub fn run(self, args: RunArgs) {
        self.server.run(args);
    }
}
