//! JSON envelope and HTTP response assembly.

use http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde::{Deserialize, Serialize};

pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// `{ success, data?, message?, error? }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error,
        }
    }
}

/// Headers every response carries.
#[derive(Debug, Clone)]
pub struct ResponsePolicy {
    pub allow_origin: String,
    pub cache_max_age_secs: u64,
}

impl ResponsePolicy {
    fn builder(&self, status: StatusCode) -> http::response::Builder {
        Response::builder()
            .status(status)
            .header("Access-Control-Allow-Origin", self.allow_origin.as_str())
            .header("Access-Control-Allow-Methods", ALLOW_METHODS)
            .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
    }

    /// Empty `200` answer to a CORS preflight.
    pub fn preflight(&self) -> Response<Vec<u8>> {
        finish(
            self.builder(StatusCode::OK).header(CONTENT_LENGTH, 0),
            Vec::new(),
        )
    }

    /// JSON body. `cacheable` adds the `Cache-Control` directive.
    pub fn json<T: Serialize>(
        &self,
        status: StatusCode,
        body: &ApiResponse<T>,
        cacheable: bool,
    ) -> Response<Vec<u8>> {
        let (status, bytes) = match serde_json::to_vec(body) {
            Ok(bytes) => (status, bytes),
            Err(e) => {
                log::error!("Failed to encode response body: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    br#"{"success":false,"message":"Failed to encode response"}"#.to_vec(),
                )
            }
        };

        let mut builder = self
            .builder(status)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, bytes.len());
        if cacheable && status.is_success() {
            builder = builder.header(
                CACHE_CONTROL,
                format!("public, max-age={}", self.cache_max_age_secs),
            );
        }
        finish(builder, bytes)
    }
}

fn finish(builder: http::response::Builder, body: Vec<u8>) -> Response<Vec<u8>> {
    builder.body(body).unwrap_or_else(|e| {
        log::error!("Failed to build response: {}", e);
        let mut response = Response::new(Vec::new());
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}
