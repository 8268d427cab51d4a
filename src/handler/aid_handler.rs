use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::aid_dto::{CreateAidRequest, UpdateAidRequest};
use crate::dto::MessageResponse;
use crate::service::aid_service::AidService;
use crate::util::error::HandlerError;
use crate::util::extract::ValidatedJson;

pub async fn add_aid_handler(
    State(service): State<Arc<dyn AidService>>,
    ValidatedJson(payload): ValidatedJson<CreateAidRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.add(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_aids_handler(
    State(service): State<Arc<dyn AidService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn get_aid_handler(
    State(service): State<Arc<dyn AidService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&id).await?;
    Ok(Json(res))
}

pub async fn update_aid_handler(
    State(service): State<Arc<dyn AidService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateAidRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update(&id, payload).await?;
    Ok(Json(res))
}

pub async fn delete_aid_handler(
    State(service): State<Arc<dyn AidService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Aide supprimée")))
}
