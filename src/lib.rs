//! Agent Index: HTTP search service for the AI agent index.
//!
//! Fetches every active agent from the agent index subgraph on each
//! request and ranks them with the hybrid TF-IDF and substring scorer
//! from [`agent_search`].
//!
//! # Architecture
//!
//! - **Config**: TOML file plus `SUBGRAPH_URL` / `PORT` overrides, resolved once at startup
//! - **Server**: axum router exposing `/search` and `/health`
//! - **Ranking**: pure, per-request, on a blocking worker

pub mod config;
pub mod error;
pub mod server;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
