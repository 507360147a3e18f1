//! HTTP server for the chat bridge.
//!
//! # Endpoints
//!
//! - `GET    /api/health`     — Backend reachability + resolved model (alias `/health`)
//! - `POST   /api/chat_once`  — Kernel-governed chat (alias `/chat`)
//! - `GET    /api/memory`     — Current short/long-term memory
//! - `DELETE /api/memory`     — Clear memory

pub mod routes;

pub use routes::{app_router, AppState};
