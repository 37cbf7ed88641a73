//! HTTP API
//!
//! JSON endpoints for update cycles and graph queries.

pub mod handler;
pub mod server;

pub use server::{router, HttpServer};
