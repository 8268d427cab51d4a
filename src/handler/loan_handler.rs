use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::loan_dto::{CreateLoanRequest, UpdateLoanRequest};
use crate::dto::MessageResponse;
use crate::service::loan_service::LoanService;
use crate::util::error::HandlerError;
use crate::util::extract::ValidatedJson;

pub async fn add_loan_handler(
    State(service): State<Arc<dyn LoanService>>,
    ValidatedJson(payload): ValidatedJson<CreateLoanRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.add(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn list_loans_handler(
    State(service): State<Arc<dyn LoanService>>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.list().await?;
    Ok(Json(res))
}

pub async fn get_loan_handler(
    State(service): State<Arc<dyn LoanService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.get(&id).await?;
    Ok(Json(res))
}

pub async fn update_loan_handler(
    State(service): State<Arc<dyn LoanService>>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateLoanRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let res = service.update(&id, payload).await?;
    Ok(Json(res))
}

pub async fn delete_loan_handler(
    State(service): State<Arc<dyn LoanService>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Prêt supprimé")))
}
