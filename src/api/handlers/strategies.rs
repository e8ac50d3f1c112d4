use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{strategy_repo, subscription_repo};
use crate::errors::AppError;
use crate::models::{is_valid_address, Strategy, Subscription};
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStrategyRequest {
    pub name: String,
    pub alpha_generator_address: String,
    #[serde(default)]
    pub protocols: Vec<String>,
    pub strategy_config: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub alpha_consumer_address: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/strategies — list active strategies
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Strategy>>>, AppError> {
    let strategies = strategy_repo::get_active_strategies(&state.db).await?;

    Ok(Json(ApiResponse::ok(strategies)))
}

/// GET /api/strategies/{id} — strategy detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Strategy>>, AppError> {
    let strategy = strategy_repo::get_strategy_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("strategy not found".into()))?;

    Ok(Json(ApiResponse::ok(strategy)))
}

/// POST /api/strategies — register a strategy for a generator
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateStrategyRequest>,
) -> Result<Json<ApiResponse<Strategy>>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    if !is_valid_address(&body.alpha_generator_address) {
        return Err(AppError::BadRequest(
            "alphaGeneratorAddress is not a valid address".into(),
        ));
    }

    let strategy = strategy_repo::insert_strategy(
        &state.db,
        body.name.trim(),
        &body.alpha_generator_address,
        &body.protocols,
        body.strategy_config.as_ref(),
    )
    .await?;

    tracing::info!(
        strategy_id = %strategy.id,
        generator = %strategy.alpha_generator_address,
        "Strategy registered"
    );

    Ok(Json(ApiResponse::ok_with_message(
        strategy,
        "strategy registered",
    )))
}

/// DELETE /api/strategies/{id} — soft-deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deactivated = strategy_repo::deactivate_strategy(&state.db, id).await?;
    if !deactivated {
        return Err(AppError::NotFound("strategy not found or inactive".into()));
    }

    Ok(Json(ApiResponse::ok_with_message((), "strategy deactivated")))
}

/// POST /api/strategies/{id}/subscribe — subscribe a consumer
pub async fn subscribe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<ApiResponse<Subscription>>, AppError> {
    if !is_valid_address(&body.alpha_consumer_address) {
        return Err(AppError::BadRequest(
            "alphaConsumerAddress is not a valid address".into(),
        ));
    }

    let strategy = strategy_repo::get_strategy_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("strategy not found".into()))?;
    if !strategy.is_active {
        return Err(AppError::BadRequest("strategy is deactivated".into()));
    }

    let subscription =
        subscription_repo::subscribe(&state.db, id, &body.alpha_consumer_address)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("consumer already has an active subscription".into())
            })?;

    tracing::info!(
        strategy_id = %id,
        consumer = %subscription.alpha_consumer_address,
        "Consumer subscribed"
    );

    Ok(Json(ApiResponse::ok_with_message(subscription, "subscribed")))
}

/// POST /api/strategies/{id}/unsubscribe — deactivate a subscription
pub async fn unsubscribe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if !is_valid_address(&body.alpha_consumer_address) {
        return Err(AppError::BadRequest(
            "alphaConsumerAddress is not a valid address".into(),
        ));
    }

    let removed =
        subscription_repo::unsubscribe(&state.db, id, &body.alpha_consumer_address).await?;
    if !removed {
        return Err(AppError::NotFound("no active subscription found".into()));
    }

    Ok(Json(ApiResponse::ok_with_message((), "unsubscribed")))
}

/// GET /api/strategies/{id}/subscribers — active subscriptions
pub async fn subscribers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Subscription>>>, AppError> {
    strategy_repo::get_strategy_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("strategy not found".into()))?;

    let subscriptions = subscription_repo::get_active_subscriptions(&state.db, id).await?;

    Ok(Json(ApiResponse::ok(subscriptions)))
}
