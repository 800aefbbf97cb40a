//! Blockdoc Server - HTTP REST API for the block compiler
//!
//! Exposes payload validation and `.docx` rendering over HTTP:
//!
//! - **Rendering**: download the document, or receive it base64-encoded in JSON
//! - **Templates**: named `.docx` templates resolved from a configured directory
//! - **Health**: liveness and readiness probes
//!
//! # Features
//!
//! - **Authentication**: API key in `X-API-Key` or `Authorization: Bearer`
//! - **Middleware**: CORS, request ID tracking, structured logging, timeouts
//! - **Configuration**: `.env`, optional `server.*` file, `BLOCKDOC_SERVER__*` variables
//! - **Error Handling**: `{"error": {"code", "message", "details"}}` bodies
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//!
//! ## Protected Endpoints (API Key Required)
//!
//! - `POST /api/v1/render` - Render and download a `.docx`
//! - `POST /api/v1/render/base64` - Render and return `{"docx_base64": ...}`
//! - `GET /api/v1/styles` - Allowed style names
//!
//! Schema violations answer 422, malformed JSON 400, an unknown template 404
//! and any other render failure 500.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
