use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models;
use crate::schema;
use crate::views::{RestaurantDetail, RestaurantPizzaEntry, RestaurantSummary};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = Vec<RestaurantSummary>),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    use schema::restaurants::dsl::*;

    let conn = &mut *state.db.lock().await;
    let results = restaurants
        .select(models::Restaurant::as_select())
        .load(conn)?;

    Ok(Json(
        results.into_iter().map(RestaurantSummary::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its offerings", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = crate::views::ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let conn = &mut *state.db.lock().await;

    let restaurant = schema::restaurants::table
        .find(id)
        .select(models::Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Restaurant"))?;

    let offerings: Vec<(models::RestaurantPizza, models::Pizza)> =
        models::RestaurantPizza::belonging_to(&restaurant)
            .inner_join(schema::pizzas::table)
            .select((
                models::RestaurantPizza::as_select(),
                models::Pizza::as_select(),
            ))
            .load(conn)?;

    Ok(Json(RestaurantDetail {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas: offerings
            .into_iter()
            .map(|(offering, pizza)| RestaurantPizzaEntry {
                id: offering.id,
                price: offering.price,
                pizza_id: offering.pizza_id,
                restaurant_id: offering.restaurant_id,
                pizza: pizza.into(),
            })
            .collect(),
    }))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its offerings deleted"),
        (status = 404, description = "Restaurant not found", body = crate::views::ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let conn = &mut *state.db.lock().await;

    // Dependent offerings go first so the cleanup does not rely on the
    // connection's foreign_keys pragma.
    conn.transaction::<_, ApiError, _>(|conn| {
        diesel::delete(
            schema::restaurant_pizzas::table
                .filter(schema::restaurant_pizzas::restaurant_id.eq(id)),
        )
        .execute(conn)?;

        let deleted = diesel::delete(schema::restaurants::table.find(id)).execute(conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Restaurant"));
        }
        Ok(())
    })?;

    Ok(StatusCode::NO_CONTENT)
}
