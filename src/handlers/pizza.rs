use axum::{extract::State, response::Json, routing::get, Router};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models;
use crate::schema;
use crate::views::PizzaSummary;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = Vec<PizzaSummary>),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaSummary>>, ApiError> {
    use schema::pizzas::dsl::*;

    let conn = &mut *state.db.lock().await;
    let results = pizzas.select(models::Pizza::as_select()).load(conn)?;

    Ok(Json(results.into_iter().map(PizzaSummary::from).collect()))
}
