use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use slot_core::{GameError, RandomSource, SessionStore, ThreadRandom};
use slot_shared::{
    ApiError, CashoutRequest, CashoutResponse, RollRequest, RollResponse, SessionDetails,
    SessionResponse,
};

pub struct AppState<R = ThreadRandom> {
    pub store: SessionStore<R>,
}

impl<R: RandomSource> AppState<R> {
    pub fn new(store: SessionStore<R>) -> Self {
        Self { store }
    }
}

/// Carries an [`ApiError`] out of a handler as a JSON error response.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        warn!(%err, "request rejected");
        Self(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(%rejection, "malformed body");
        Self(ApiError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.body())).into_response()
    }
}

type HandlerResult<T> = Result<T, AppError>;

fn check_session_id(raw: &str) -> HandlerResult<&str> {
    Uuid::parse_str(raw)
        .map(|_| raw)
        .map_err(|_| AppError(ApiError::BadRequest("sessionId must be a UUID".into())))
}

async fn route_create_session<R: RandomSource + Send + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.store.create();
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            credits: session.credits,
        }),
    )
}

async fn route_get_session<R: RandomSource + Send + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(session_id): Path<String>,
) -> HandlerResult<Json<SessionDetails>> {
    let id = check_session_id(&session_id)?;
    Ok(Json(state.store.get(id)?.into()))
}

async fn route_roll<R: RandomSource + Send + 'static>(
    State(state): State<Arc<AppState<R>>>,
    req: Result<Json<RollRequest>, JsonRejection>,
) -> HandlerResult<Json<RollResponse>> {
    let Json(req) = req?;
    let id = check_session_id(&req.session_id)?;
    let outcome = state.store.roll(id)?;
    Ok(Json(RollResponse {
        symbols: outcome.roll,
        win_amount: outcome.payout,
        credits: outcome.credits_after,
    }))
}

async fn route_cashout<R: RandomSource + Send + 'static>(
    State(state): State<Arc<AppState<R>>>,
    req: Result<Json<CashoutRequest>, JsonRejection>,
) -> HandlerResult<Json<CashoutResponse>> {
    let Json(req) = req?;
    let id = check_session_id(&req.session_id)?;
    let cashout = state.store.cashout(id)?;
    Ok(Json(CashoutResponse {
        final_credits: cashout.final_credits,
        status: cashout.status,
    }))
}

pub fn build_router<R: RandomSource + Send + 'static>(state: Arc<AppState<R>>) -> Router {
    Router::new()
        .route("/session", post(route_create_session::<R>))
        .route("/session/:session_id", get(route_get_session::<R>))
        .route("/roll", post(route_roll::<R>))
        .route("/cashout", post(route_cashout::<R>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
