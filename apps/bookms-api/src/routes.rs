use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use bookms_service::{
	AddBookRequest, BookDetail, BookRecord, Error as ServiceError, ListBooksRequest,
	ListBooksResponse, ReadingStats, SearchRequest, SearchResponse,
};

const SEARCH_FAILED: &str = "검색 중 오류가 발생했습니다.";
const REQUEST_FAILED: &str = "요청을 처리하는 중 오류가 발생했습니다.";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/search", post(search))
		.route("/api/books", get(list_books).post(add_book))
		.route("/api/books/{id}", get(get_book))
		.route("/api/stats", get(stats))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state
		.service
		.search(payload)
		.await
		.map_err(|err| ApiError::from_service(err, SEARCH_FAILED))?;

	Ok(Json(response))
}

async fn list_books(
	State(state): State<AppState>,
	query: Result<Query<ListBooksRequest>, QueryRejection>,
) -> Result<Json<ListBooksResponse>, ApiError> {
	let Query(query) = query?;
	let response = state.service.list_books(query).await?;

	Ok(Json(response))
}

async fn get_book(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookDetail>, ApiError> {
	let Path(id) = id?;
	let response = state.service.get_book(id).await?;

	Ok(Json(response))
}

async fn add_book(
	State(state): State<AppState>,
	payload: Result<Json<AddBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookRecord>), ApiError> {
	let Json(payload) = payload?;
	let response = state.service.add_book(payload).await?;

	Ok((StatusCode::CREATED, Json(response)))
}

async fn stats(State(state): State<AppState>) -> Result<Json<ReadingStats>, ApiError> {
	let response = state.service.stats().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	error_code: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}

	/// Client errors keep their message; server errors are logged and replaced by `fallback`.
	fn from_service(err: ServiceError, fallback: &str) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message),
			err @ (ServiceError::Storage { .. } | ServiceError::Internal { .. }) => {
				tracing::error!(error = %err, "Request failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", fallback)
			},
		}
	}

	fn rejection(message: String) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		Self::from_service(err, REQUEST_FAILED)
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::rejection(rejection.body_text())
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::rejection(rejection.body_text())
	}
}
impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		Self::rejection(rejection.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error: self.message, error_code: self.error_code };

		(self.status, Json(body)).into_response()
	}
}
