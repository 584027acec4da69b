//! Stateless bearer-token gate for an axum request pipeline.
//!
//! Every request passes the CORS preflight responder first, then the access
//! decision: allow-list, credential verification, principal/user resolution.
//! Identity travels only in the `Authorization` header; nothing is kept between
//! requests.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
