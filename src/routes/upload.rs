use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    routing::post,
    Router,
};
use crate::models::{ApiResponse, AppState};
use crate::upload::{FormError, StagedForm, UploadPipeline, MSG_INVALID_FORM, MSG_METHOD_NOT_ALLOWED};
use tracing::{debug, error, info};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_images).fallback(method_not_allowed))
}

/// POST /upload - Stage the `images` files and push each one to storage
async fn upload_images(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResponse {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!("Rejected upload body: {}", rejection);
            return invalid_form();
        }
    };

    let form = match StagedForm::from_multipart(&mut multipart).await {
        Ok(form) => form,
        Err(FormError::Io(e)) => {
            error!("Failed to spool upload: {}", e);
            return invalid_form();
        }
        Err(e) => {
            debug!("Invalid upload form: {}", e);
            return invalid_form();
        }
    };

    info!("Upload request received with {} file(s)", form.len());

    let pipeline = UploadPipeline::new(state.store.as_ref(), &state.config.storage.public_url);
    let response = pipeline.handle(&form).await;

    info!("Upload finished: {} ({})", response.message, response.status);
    response
}

async fn method_not_allowed() -> ApiResponse {
    ApiResponse::message(StatusCode::METHOD_NOT_ALLOWED.as_u16(), MSG_METHOD_NOT_ALLOWED)
}

fn invalid_form() -> ApiResponse {
    ApiResponse::message(StatusCode::BAD_REQUEST.as_u16(), MSG_INVALID_FORM)
}
