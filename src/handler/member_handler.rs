use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::member_dto::{CreateMemberRequest, UpdateMemberRequest};
use crate::dto::MessageResponse;
use crate::service::member_service::MemberService;
use crate::util::error::HandlerError;
use crate::util::extract::ValidatedJson;

pub async fn add_member_handler(
    State(service): State<Arc<dyn MemberService>>,
    ValidatedJson(payload): ValidatedJson<CreateMemberRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.add(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_members_handler(
    State(service): State<Arc<dyn MemberService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn get_member_handler(
    State(service): State<Arc<dyn MemberService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&id).await?;
    Ok(Json(res))
}

pub async fn update_member_handler(
    State(service): State<Arc<dyn MemberService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update(&id, payload).await?;
    Ok(Json(res))
}

pub async fn delete_member_handler(
    State(service): State<Arc<dyn MemberService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Membre supprimé")))
}
