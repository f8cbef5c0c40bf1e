use actix_web::web;
use utoipa::OpenApi;

use crate::database::models::{
    PizzaSummary, RestaurantDetail, RestaurantPizzaDetail, RestaurantPizzaEntry, RestaurantSummary,
};
use crate::errors::{ErrorResponse, json_error_handler};

pub mod home;
pub mod middleware;
pub mod pizzas;
pub mod restaurant_pizzas;
pub mod restaurants;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::index,
        restaurants::get_restaurants,
        restaurants::get_restaurant_by_id,
        restaurants::delete_restaurant,
        pizzas::get_pizzas,
        restaurant_pizzas::create_restaurant_pizza,
    ),
    components(
        schemas(
            RestaurantSummary,
            RestaurantDetail,
            RestaurantPizzaEntry,
            RestaurantPizzaDetail,
            PizzaSummary,
            ErrorResponse,
            restaurant_pizzas::CreateRestaurantPizzaDto,
        )
    ),
    tags(
        (name = "Home", description = "Static landing page"),
        (name = "Restaurants", description = "Restaurant listing, lookup and removal"),
        (name = "Pizzas", description = "Pizza catalogue"),
        (name = "RestaurantPizzas", description = "Priced links between restaurants and pizzas")
    )
)]
pub struct ApiDoc;

/// Registers every route plus the JSON body configuration they rely on.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(home::init_routes)
        .configure(restaurants::init_routes)
        .configure(pizzas::init_routes)
        .configure(restaurant_pizzas::init_routes);
}
