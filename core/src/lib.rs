//! Product Proxy Core Library
//! Configuration, backend client and HTTP server for the product proxy

pub mod config;
pub mod proxy;
