//! # Toolbox
//!
//! A small HTTP service exposing stateless developer utilities:
//!
//! - **Client info**: caller IP and user agent
//! - **Server time**: epoch seconds plus UTC and local RFC 3339 timestamps
//! - **UUIDs**: 1-20 random v4 UUIDs per call
//! - **JSON format**: two-space pretty printing
//! - **Hashing**: MD5 / SHA-256 hex digests
//! - **JWT decode**: header and payload inspection without verification
//! - **Echo**: method, headers, query and body mirrored back
//! - **Health**: version and uptime, no API key required
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum HTTP Server                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Middleware (Request ID/Envelope → CORS → Trace → Auth)     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Handlers (network, generators, transform, health)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Services (digest, generate, jwt, text) - pure functions    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::net::SocketAddr;
//!
//! use toolbox::{AppState, Config, build_router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
//!     let app = build_router(AppState::new(config));
//!
//!     axum::serve(
//!         listener,
//!         app.into_make_service_with_connect_info::<SocketAddr>(),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Security Configuration
//!
//! Set the shared secret expected in `X-API-Key`:
//! ```bash
//! APP_API_KEY=your-secret-key cargo run
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod validation;

// Re-exports for convenience
pub use config::Config;
pub use envelope::{Envelope, RequestContext};
pub use error::{AppError, AppResult};
pub use routes::build_router;
pub use state::AppState;
