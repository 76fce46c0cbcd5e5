pub mod ingest;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn ingest_routes() -> Router<SharedState> {
    Router::new().route("/", get(ingest::liveness).post(ingest::submit))
}
