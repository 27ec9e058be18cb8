//! HTTP binding for the film-rental auth core: routing, middleware for both
//! gates, request/response mapping and process configuration.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
