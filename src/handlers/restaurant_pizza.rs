use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use diesel::prelude::*;
use tracing::instrument;

use crate::error::ApiError;
use crate::models;
use crate::schema;
use crate::views::{CreateRestaurantPizzaRequest, RestaurantPizzaCreated};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Offering created", body = RestaurantPizzaCreated),
        (status = 400, description = "Validation failed", body = crate::views::ValidationErrorsResponse),
        (status = 500, description = "Persistence failure", body = crate::views::ValidationErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), ApiError> {
    // A malformed body is a validation failure, not a framework 422.
    let Json(payload) = payload.map_err(|err| ApiError::Validation(vec![err.body_text()]))?;

    let (price, pizza_id, restaurant_id) =
        match (payload.price, payload.pizza_id, payload.restaurant_id) {
            (Some(price), Some(pizza_id), Some(restaurant_id)) => {
                (price, pizza_id, restaurant_id)
            }
            (price, pizza_id, restaurant_id) => {
                let mut errors = Vec::new();
                if price.is_none() {
                    errors.push("price is required".to_string());
                }
                if pizza_id.is_none() {
                    errors.push("pizza_id is required".to_string());
                }
                if restaurant_id.is_none() {
                    errors.push("restaurant_id is required".to_string());
                }
                return Err(ApiError::Validation(errors));
            }
        };

    let conn = &mut *state.db.lock().await;

    // Reference lookups and the insert share one transaction.
    let (created, restaurant, pizza) = conn.transaction::<_, ApiError, _>(|conn| {
        let restaurant = schema::restaurants::table
            .find(restaurant_id)
            .select(models::Restaurant::as_select())
            .first(conn)
            .optional()?;
        let pizza = schema::pizzas::table
            .find(pizza_id)
            .select(models::Pizza::as_select())
            .first(conn)
            .optional()?;

        let (restaurant, pizza) = match (restaurant, pizza) {
            (Some(restaurant), Some(pizza)) => (restaurant, pizza),
            (restaurant, pizza) => {
                let mut errors = Vec::new();
                if restaurant.is_none() {
                    errors.push(format!("No restaurant with id {restaurant_id}"));
                }
                if pizza.is_none() {
                    errors.push(format!("No pizza with id {pizza_id}"));
                }
                return Err(ApiError::Validation(errors));
            }
        };

        let new_offering = models::NewRestaurantPizza::new(restaurant.id, pizza.id, price)
            .map_err(|err| ApiError::Validation(vec![err.to_string()]))?;

        let created: models::RestaurantPizza =
            diesel::insert_into(schema::restaurant_pizzas::table)
                .values(&new_offering)
                .get_result(conn)?;

        Ok((created, restaurant, pizza))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(RestaurantPizzaCreated {
            id: created.id,
            price: created.price,
            pizza_id: created.pizza_id,
            restaurant_id: created.restaurant_id,
            pizza: pizza.into(),
            restaurant: restaurant.into(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use diesel::connection::SimpleConnection;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::handlers::testing::{
        app, body_json, count_offerings_for, insert_pizza, insert_restaurant, json_request,
        test_state,
    };

    #[tokio::test]
    async fn test_create_offering() {
        let state = test_state();
        let restaurant = insert_restaurant(&state, "Kiki's Pizza", "address3").await;
        let pizza = insert_pizza(&state, "Emma", "Dough, Tomato Sauce, Cheese").await;

        let response = app(state.clone())
            .oneshot(json_request(
                "POST",
                "/restaurant_pizzas",
                json!({"price": 15, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["price"], 15);
        assert_eq!(body["pizza_id"], pizza.id);
        assert_eq!(body["restaurant_id"], restaurant.id);
        assert_eq!(body["pizza"]["id"], pizza.id);
        assert_eq!(body["pizza"]["name"], "Emma");
        assert_eq!(body["restaurant"]["id"], restaurant.id);
        assert!(body["pizza"].get("restaurant_pizzas").is_none());
        assert!(body["restaurant"].get("restaurant_pizzas").is_none());

        assert_eq!(count_offerings_for(&state, restaurant.id).await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_price() {
        let state = test_state();
        let restaurant = insert_restaurant(&state, "Kiki's Pizza", "address3").await;
        let pizza = insert_pizza(&state, "Emma", "Dough, Tomato Sauce, Cheese").await;

        for price in [0, 31, 50] {
            let response = app(state.clone())
                .oneshot(json_request(
                    "POST",
                    "/restaurant_pizzas",
                    json!({"price": price, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
        }

        // Nothing was persisted for any rejected request.
        assert_eq!(count_offerings_for(&state, restaurant.id).await, 0);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let state = test_state();

        let response = app(state)
            .oneshot(json_request("POST", "/restaurant_pizzas", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_with_unknown_references() {
        let state = test_state();
        let pizza = insert_pizza(&state, "Emma", "Dough, Tomato Sauce, Cheese").await;

        let response = app(state.clone())
            .oneshot(json_request(
                "POST",
                "/restaurant_pizzas",
                json!({"price": 5, "pizza_id": pizza.id, "restaurant_id": 999999}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_returns_500_when_insert_fails() {
        let state = test_state();
        let restaurant = insert_restaurant(&state, "Kiki's Pizza", "address3").await;
        let pizza = insert_pizza(&state, "Emma", "Dough, Tomato Sauce, Cheese").await;

        // Valid references and price, but the insert itself cannot succeed.
        {
            let conn = &mut *state.db.lock().await;
            conn.batch_execute("DROP TABLE restaurant_pizzas").unwrap();
        }

        let response = app(state)
            .oneshot(json_request(
                "POST",
                "/restaurant_pizzas",
                json!({"price": 15, "pizza_id": pizza.id, "restaurant_id": restaurant.id}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_create_with_malformed_body() {
        let state = test_state();

        let response = app(state)
            .oneshot(json_request(
                "POST",
                "/restaurant_pizzas",
                json!({"price": "fifteen", "pizza_id": 1, "restaurant_id": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
    }
}
