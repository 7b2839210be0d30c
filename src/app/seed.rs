use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tracing::info;

use crate::db::{establish_connection, MIGRATIONS};
use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conn = &mut establish_connection();
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;

        let mut seeded_restaurants = Vec::new();
        for (name, address) in [
            ("Karen's Pizza Shack", "address1"),
            ("Sanjay's Pizza", "address2"),
            ("Kiki's Pizza", "address3"),
        ] {
            let restaurant: Restaurant = diesel::insert_into(restaurants::table)
                .values(NewRestaurant {
                    name: name.to_string(),
                    address: address.to_string(),
                })
                .get_result(conn)?;
            seeded_restaurants.push(restaurant);
        }

        let mut seeded_pizzas = Vec::new();
        for (name, ingredients) in [
            ("Emma", "Dough, Tomato Sauce, Cheese"),
            ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
            ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
        ] {
            let pizza: Pizza = diesel::insert_into(pizzas::table)
                .values(NewPizza {
                    name: name.to_string(),
                    ingredients: ingredients.to_string(),
                })
                .get_result(conn)?;
            seeded_pizzas.push(pizza);
        }

        for (restaurant, pizza, price) in [
            (&seeded_restaurants[0], &seeded_pizzas[0], 5),
            (&seeded_restaurants[0], &seeded_pizzas[1], 12),
            (&seeded_restaurants[1], &seeded_pizzas[2], 20),
            (&seeded_restaurants[2], &seeded_pizzas[0], 8),
        ] {
            let offering = NewRestaurantPizza::new(restaurant.id, pizza.id, price)
                .expect("seed prices are in range");
            diesel::insert_into(restaurant_pizzas::table)
                .values(offering)
                .execute(conn)?;
        }

        info!(
            restaurants = seeded_restaurants.len(),
            pizzas = seeded_pizzas.len(),
            "seeded database"
        );
        Ok(())
    })?;

    Ok(())
}
