//! Complaint Intake API
//!
//! HTTP service over `complaint-core`: submit complaints, track them by
//! ticket number, and read per-status counts, all on `/complaint`.
//! Bind to 127.0.0.1 by default.

pub mod config;
mod error;
mod handlers;
mod state;
mod types;

use std::path::Path;
use std::sync::Arc;

use axum::{
  http::{header::CONTENT_TYPE, Method},
  routing::get,
  Router,
};
use tower_http::{
  cors::{Any, CorsLayer},
  services::ServeDir,
  trace::TraceLayer,
};

pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use handlers::{health, preflight, query, submit, unsupported_method};
pub use state::AppState;
pub use types::{ComplaintQuery, Envelope};

/// Path the bundled browser front-end posts to.
pub const FRONTEND_ENDPOINT: &str = "/api/complaint.php";

/// Build the full router. The endpoint answers on `/complaint` and on
/// [`FRONTEND_ENDPOINT`]. When `static_dir` is set, every other path is served
/// from it.
pub fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([CONTENT_TYPE]);

  let endpoint = get(query)
    .post(submit)
    .options(preflight)
    .fallback(unsupported_method);

  let mut app = Router::new()
    .route("/health", get(health))
    .route("/complaint", endpoint.clone())
    .route(FRONTEND_ENDPOINT, endpoint);

  if let Some(dir) = static_dir {
    app = app.fallback_service(ServeDir::new(dir));
  }

  app
    .layer(cors)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
