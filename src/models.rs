use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_MIN: i32 = 1;
pub const PRICE_MAX: i32 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Price must be between 1 and 30")]
pub struct PriceOutOfRange;

/// Accepts a price only inside the permitted [`PRICE_MIN`]..=[`PRICE_MAX`]
/// range. Pure check, independent of any persistence machinery.
pub fn validate_price(price: i32) -> Result<i32, PriceOutOfRange> {
    if (PRICE_MIN..=PRICE_MAX).contains(&price) {
        Ok(price)
    } else {
        Err(PriceOutOfRange)
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    pub price: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    restaurant_id: i32,
    pizza_id: i32,
    price: i32,
}

impl NewRestaurantPizza {
    /// Sole constructor; the price passes through [`validate_price`], so an
    /// out-of-range offering can never reach an insert.
    pub fn new(
        restaurant_id: i32,
        pizza_id: i32,
        price: i32,
    ) -> Result<Self, PriceOutOfRange> {
        Ok(Self {
            restaurant_id,
            pizza_id,
            price: validate_price(price)?,
        })
    }
}
