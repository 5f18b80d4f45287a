//! # registrar
//!
//! A small JSON API for student records over a document store.
//!
//! ## The contract
//!
//! Every route answers with one of two envelopes:
//!
//! ```text
//! {"data": [payload], "code": 200, "message": "..."}
//! {"error": "...",    "code": 404, "message": "..."}
//! ```
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | welcome message |
//! | `GET /student/` | every student |
//! | `POST /student/` | add a student |
//! | `GET /student/{id}` | one student |
//! | `PUT /student/{id}` | merge-patch a student |
//! | `DELETE /student/{id}` | remove a student |
//! | `GET /healthz`, `GET /readyz` | health checks |
//!
//! TLS, rate limiting and body-size limits belong to the fronting proxy.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use registrar::{AppState, Server, router, store::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), registrar::Error> {
//!     let app = router(AppState::new(Arc::new(MemoryStore::new())));
//!     Server::bind("127.0.0.1:8000".parse().unwrap()).await?.serve(app).await
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod store;
pub mod student;
pub mod telemetry;

pub use app::{AppState, router};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
