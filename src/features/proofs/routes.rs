use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::proofs::handlers;
use crate::features::proofs::services::ProofService;
use crate::shared::multipart::{upload_body_limit, MAX_FILES_PER_REQUEST};

pub fn routes(service: Arc<ProofService>) -> Router {
    Router::new()
        .route(
            "/api/v1/complaints/{id}/proofs",
            get(handlers::list_proofs).merge(
                post(handlers::upload_proofs).layer(upload_body_limit(MAX_FILES_PER_REQUEST)),
            ),
        )
        .route(
            "/api/v1/complaints/{id}/proofs/{proof_id}",
            delete(handlers::delete_proof),
        )
        .with_state(service)
}
