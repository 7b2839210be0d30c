pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

// Re-export routers for easier importing
pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use utoipa::OpenApi;

use crate::db::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::views::RestaurantSummary,
            crate::views::RestaurantDetail,
            crate::views::RestaurantPizzaEntry,
            crate::views::PizzaSummary,
            crate::views::CreateRestaurantPizzaRequest,
            crate::views::RestaurantPizzaCreated,
            crate::views::ApiErrorResponse,
            crate::views::ValidationErrorsResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant pizza offering endpoints")
    ),
    info(
        title = "Pizza Restaurants API",
        description = "CRUD API over restaurants, pizzas, and their offerings",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
