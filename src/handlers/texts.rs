use axum::{
    extract::{Query, State},
    response::Json,
};
use common::LocalizedTexts;
use tracing::instrument;

use crate::schemas::{ApiResponse, AppState, TextsQuery};

/// Get every UI label for a language
#[utoipa::path(
    get,
    path = "/api/v1/texts",
    tag = "i18n",
    params(TextsQuery),
    responses(
        (status = 200, description = "Labels retrieved successfully", body = ApiResponse<LocalizedTexts>)
    )
)]
#[instrument(skip(state))]
pub async fn get_texts(
    State(state): State<AppState>,
    Query(query): Query<TextsQuery>,
) -> Json<ApiResponse<LocalizedTexts>> {
    let language = query
        .lang
        .as_deref()
        .map(common::Language::from_code)
        .unwrap_or(state.default_language);

    Json(ApiResponse::ok(
        LocalizedTexts::from(language),
        "Texts retrieved successfully",
    ))
}
