pub mod configuration;
pub mod metric;
pub mod response;
pub mod server;
pub mod service;
