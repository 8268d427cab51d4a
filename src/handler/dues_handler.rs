use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::dues_dto::{CreateDuesRequest, UpdateDuesRequest};
use crate::dto::MessageResponse;
use crate::service::dues_service::DuesService;
use crate::util::error::HandlerError;
use crate::util::extract::ValidatedJson;

pub async fn add_dues_handler(
    State(service): State<Arc<dyn DuesService>>,
    ValidatedJson(payload): ValidatedJson<CreateDuesRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.add(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_dues_handler(
    State(service): State<Arc<dyn DuesService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn get_dues_handler(
    State(service): State<Arc<dyn DuesService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&id).await?;
    Ok(Json(res))
}

pub async fn update_dues_handler(
    State(service): State<Arc<dyn DuesService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateDuesRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update(&id, payload).await?;
    Ok(Json(res))
}

pub async fn delete_dues_handler(
    State(service): State<Arc<dyn DuesService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Cotisation supprimée")))
}
