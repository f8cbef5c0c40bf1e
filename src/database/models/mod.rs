//! SeaORM entities for the `restaurants`, `pizzas` and `restaurant_pizzas`
//! tables, together with the JSON projections each of them is exposed as.

pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::PizzaSummary;
pub use restaurant::{RestaurantDetail, RestaurantSummary};
pub use restaurant_pizza::{
    MAX_PRICE, MIN_PRICE, Price, RestaurantPizzaDetail, RestaurantPizzaEntry, ValidationError,
};
