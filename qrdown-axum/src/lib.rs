//! qrdown-axum: HTTP API for shared Markdown documents.
//!
//! Routes:
//!
//! ```text
//! GET  /markdown/{id}          read a document (empty body when missing)
//! POST /markdown               create or overwrite a document
//! POST /upload                 multipart `file` + `postId`
//! POST /upload/logo            multipart `file` + `postId`
//! GET  /upload/logo/{postId}   logo lookup
//! GET  /health
//! ```

pub mod app;
pub mod config;
pub mod routes;
pub mod state;
mod error;
pub use error::{ApiError, ErrorKind};
pub use state::AppState;
pub use config::ServerConfig;

pub use app::{build, QrdownApp};
