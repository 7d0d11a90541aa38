//! API Module
//!
//! HTTP handlers and routing for the JSON cache service.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value under a key
//! - `GET /get/:key` - Retrieve a value and its remaining TTL
//! - `GET /exists/:key` - Check whether a key is present
//! - `DELETE /del/:key` - Delete a key
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
