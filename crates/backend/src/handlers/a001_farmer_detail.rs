use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::a001_farmer_detail::aggregate::{CreateFarmerDetailDto, Realm};
use contracts::domain::a001_farmer_detail::responses::{FailureResponse, NOT_FOUND_MESSAGE};

use super::AppState;
use crate::domain::a001_farmer_detail::projector;
use crate::domain::a001_farmer_detail::query::{FarmerFilter, PageRequest};
use crate::domain::a001_farmer_detail::FarmerDetailError;

/// List query parameters. Everything arrives as raw strings; parsing
/// and defaulting happen in the domain layer.
#[derive(Debug, Default, Deserialize)]
pub struct ListFarmersQuery {
    #[serde(rename = "updatedFrom")]
    pub updated_from: Option<String>,
    #[serde(rename = "updatedTo")]
    pub updated_to: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(FailureResponse::new(message))).into_response()
}

/// POST /:realm/:coop_id/farmers
pub async fn admit(
    State(state): State<AppState>,
    Path((realm, coop_id)): Path<(Realm, String)>,
    payload: Result<Json<CreateFarmerDetailDto>, JsonRejection>,
) -> Response {
    let dto = match payload {
        Ok(Json(dto)) => dto,
        Err(rejection) => {
            tracing::warn!(%realm, %coop_id, "Cannot decode farmer payload: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "fail", "message": rejection.body_text()})),
            )
                .into_response();
        }
    };

    let farmer_id = dto.farmer_id.clone();
    match state.farmers.admit(realm, &coop_id, dto).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(projector::created_response(&record)),
        )
            .into_response(),
        Err(e) if e.is_validation() => (
            StatusCode::BAD_REQUEST,
            Json(projector::error_response(&farmer_id, &e.to_string(), Utc::now())),
        )
            .into_response(),
        Err(e) => failure(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

/// GET /:realm/:coop_id/farmers
pub async fn list(
    State(state): State<AppState>,
    Path((realm, coop_id)): Path<(Realm, String)>,
    Query(query): Query<ListFarmersQuery>,
) -> Response {
    let filter = match FarmerFilter::from_query(
        coop_id,
        query.updated_from.as_deref(),
        query.updated_to.as_deref(),
    ) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(%realm, "Rejected list request: {}", e);
            return failure(StatusCode::BAD_REQUEST, e.to_string());
        }
    };
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    match state.farmers.list(&filter, page).await {
        Ok((items, pagination)) => {
            (StatusCode::OK, Json(projector::list_response(&items, pagination))).into_response()
        }
        Err(e) => failure(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}

/// GET /:realm/:coop_id/farmers/:farmer_id
pub async fn get_one(
    State(state): State<AppState>,
    Path((_realm, coop_id, farmer_id)): Path<(Realm, String, String)>,
) -> Response {
    match state.farmers.get_one(&coop_id, &farmer_id).await {
        Ok(record) => (StatusCode::OK, Json(projector::to_detail_view(&record))).into_response(),
        Err(FarmerDetailError::NotFound) => failure(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => failure(StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
