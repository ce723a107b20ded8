//! Proxy module - forwards product requests to the backend service

pub mod error;
pub mod handlers;
pub mod server;
pub mod upstream;

pub use error::ProxyError;
pub use server::{router, AppState, ProxyServer};
pub use upstream::client::BackendClient;
