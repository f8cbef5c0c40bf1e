use actix_web::{post, web, HttpRequest, HttpResponse};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    api::middleware::request_id,
    app_state::AppState,
    database::models::{Price, RestaurantPizzaDetail, pizza, restaurant, restaurant_pizza},
    errors::{AppError, ErrorResponse, REQUIRED_FIELDS_MESSAGE},
};

/// All three fields are required; they are optional here so a missing one
/// yields a 400 with a message instead of a deserialization failure.
#[derive(Deserialize, ToSchema, Clone, Debug, Default)]
pub struct CreateRestaurantPizzaDto {
    pub price: Option<i64>,
    pub pizza_id: Option<i64>,
    pub restaurant_id: Option<i64>,
}

// ids beyond i32 cannot exist in the store
async fn find_pizza(db: &DatabaseConnection, id: i64) -> Result<Option<pizza::Model>, DbErr> {
    match i32::try_from(id) {
        Ok(id) => pizza::Entity::find_by_id(id).one(db).await,
        Err(_) => Ok(None),
    }
}

async fn find_restaurant(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<restaurant::Model>, DbErr> {
    match i32::try_from(id) {
        Ok(id) => restaurant::Entity::find_by_id(id).one(db).await,
        Err(_) => Ok(None),
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    tag = "RestaurantPizzas",
    request_body = CreateRestaurantPizzaDto,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaDetail),
        (status = 400, description = "Missing fields or validation errors", body = ErrorResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ErrorResponse)
    )
)]
#[post("")]
async fn create_restaurant_pizza(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<Option<CreateRestaurantPizzaDto>>,
) -> Result<HttpResponse, AppError> {
    // a literal `null` body counts as every field missing
    let dto = body.into_inner().unwrap_or_default();
    let (Some(price), Some(pizza_id), Some(restaurant_id)) =
        (dto.price, dto.pizza_id, dto.restaurant_id)
    else {
        return Err(AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    let pizza = find_pizza(&data.db, pizza_id)
        .await?
        .ok_or_else(AppError::pizza_not_found)?;
    let restaurant = find_restaurant(&data.db, restaurant_id)
        .await?
        .ok_or_else(AppError::restaurant_not_found)?;

    let price = Price::try_from(price).inspect_err(|e| {
        log::warn!("request_id={} rejected restaurant_pizza: {}", request_id(&req), e);
    })?;

    // Any failure while writing is reported as the same coarse validation error.
    let created = restaurant_pizza::create(&data.db, price, &pizza, &restaurant)
        .await
        .map_err(|e| {
            log::warn!(
                "request_id={} failed to persist restaurant_pizza: {}",
                request_id(&req),
                e
            );
            AppError::Validation(e.to_string())
        })?;

    log::info!(
        "request_id={} created restaurant_pizza {} (restaurant {}, pizza {}, price {})",
        request_id(&req),
        created.id,
        created.restaurant_id,
        created.pizza_id,
        created.price
    );
    Ok(HttpResponse::Created().json(created))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/restaurant_pizzas").service(create_restaurant_pizza));
}
