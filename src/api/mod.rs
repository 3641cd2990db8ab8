pub mod common;
pub mod gcs_file_test;
pub mod process_invoice;
pub mod root;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root::service_status))
        .route("/process-invoice", post(process_invoice::process_invoice))
        .route("/gcs-file-test", post(gcs_file_test::gcs_file_test))
}
