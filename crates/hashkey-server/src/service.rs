use std::sync::Arc;

use async_trait::async_trait;
use hashkey::{Clock, KeyGenerator, KeySet, SystemClock};
use http::{Method, Response, StatusCode};
use percent_encoding::percent_decode_str;
use pingora::apps::http_app::ServeHttp;
use pingora::protocols::http::ServerSession;

use crate::metric::{Metrics, Route};
use crate::response::{ApiResponse, ResponsePolicy};

pub const KEYS_PATH: &str = "/api/keys";
pub const BATCH_PATH_PREFIX: &str = "/api/batch/";

/// Resolved target of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Keys,
    Batch(&'a str),
    Unknown,
}

impl<'a> Target<'a> {
    pub fn from_path(path: &'a str) -> Self {
        if path == KEYS_PATH {
            Target::Keys
        } else if let Some(id) = path.strip_prefix(BATCH_PATH_PREFIX) {
            if id.contains('/') {
                Target::Unknown
            } else {
                Target::Batch(id)
            }
        } else {
            Target::Unknown
        }
    }

    fn route(&self) -> Route {
        match self {
            Target::Keys => Route::Keys,
            Target::Batch(_) => Route::Batch,
            Target::Unknown => Route::Unknown,
        }
    }
}

/// HTTP front of the key generator.
pub struct KeyService<C: Clock = SystemClock> {
    generator: KeyGenerator<C>,
    policy: ResponsePolicy,
    metrics: Arc<Metrics>,
}

impl<C: Clock> KeyService<C> {
    pub fn new(generator: KeyGenerator<C>, policy: ResponsePolicy, metrics: Arc<Metrics>) -> Self {
        Self {
            generator,
            policy,
            metrics,
        }
    }

    /// Answer a request given its method and path.
    pub fn handle(&self, method: &Method, path: &str) -> Response<Vec<u8>> {
        let target = Target::from_path(path);

        if method == Method::OPTIONS {
            self.metrics.record(Route::Preflight, 200);
            return self.policy.preflight();
        }

        let response = match target {
            Target::Unknown => self.policy.json::<()>(
                StatusCode::NOT_FOUND,
                &ApiResponse::failure("Not found", Some(format!("no route for {path}"))),
                false,
            ),
            _ if method != Method::GET && method != Method::POST => self.policy.json::<()>(
                StatusCode::METHOD_NOT_ALLOWED,
                &ApiResponse::failure("Method not allowed", None),
                false,
            ),
            Target::Keys => self.respond(
                self.generator.generate_random_set(),
                Some("Hash keys generated successfully"),
                "Failed to generate keys",
            ),
            Target::Batch(raw) => {
                let id = percent_decode_str(raw).decode_utf8_lossy();
                self.respond(
                    self.generator.generate_batch(&id),
                    None,
                    "Batch generation failed",
                )
            }
        };

        self.metrics
            .record(target.route(), response.status().as_u16());
        response
    }

    fn respond(
        &self,
        generated: hashkey::Result<KeySet>,
        success_message: Option<&str>,
        failure_message: &str,
    ) -> Response<Vec<u8>> {
        match generated {
            Ok(set) => {
                log::debug!("Generated key set {}", set.batch_id);
                let mut body = ApiResponse::ok(set);
                if let Some(message) = success_message {
                    body = body.with_message(message);
                }
                self.policy.json(StatusCode::OK, &body, true)
            }
            Err(e) => {
                log::error!("Key generation error: {}", e);
                self.policy.json::<()>(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ApiResponse::failure(failure_message, Some(e.to_string())),
                    false,
                )
            }
        }
    }
}

#[async_trait]
impl<C> ServeHttp for KeyService<C>
where
    C: Clock + Send + Sync,
{
    async fn response(&self, http_stream: &mut ServerSession) -> Response<Vec<u8>> {
        let header = http_stream.req_header();
        let method = header.method.clone();
        let path = header.uri.path().to_owned();
        self.handle(&method, &path)
    }
}
