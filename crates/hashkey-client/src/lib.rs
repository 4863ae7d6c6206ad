//! Client side of the hash key service.
//!
//! [`KeyClient`] asks the server for a key set and falls back to local
//! generation when the server cannot deliver one. [`KeyBoard`] keeps the keys
//! currently on display and renders them as text.

mod board;
mod client;
mod error;

pub use board::KeyBoard;
pub use client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, KeyClient, Loaded, Source};
pub use error::{ClientError, Result};
