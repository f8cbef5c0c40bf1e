use actix_web::{delete, get, web, HttpResponse};

use crate::{
    app_state::AppState,
    database::models::{RestaurantDetail, RestaurantSummary, restaurant},
    errors::{AppError, ErrorResponse},
};

// any integer routes here; ids beyond the i32 key cannot exist
fn stored_id(id: i64) -> Result<i32, AppError> {
    i32::try_from(id).map_err(|_| {
        log::debug!("Restaurant id {} is outside the key range", id);
        AppError::restaurant_not_found()
    })
}

#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "Restaurants",
    responses(
        (status = 200, description = "All restaurants, without their menus", body = [RestaurantSummary])
    )
)]
#[get("")]
async fn get_restaurants(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let restaurants = restaurant::list(&data.db).await?;
    Ok(HttpResponse::Ok().json(restaurants))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    tag = "Restaurants",
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 200, description = "Restaurant with its restaurant_pizzas", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    )
)]
#[get("/{id}")]
async fn get_restaurant_by_id(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let restaurant_id = stored_id(path.into_inner())?;
    let detail = restaurant::load_detail(&data.db, restaurant_id)
        .await?
        .ok_or_else(|| {
            log::debug!("Restaurant {} not found", restaurant_id);
            AppError::restaurant_not_found()
        })?;

    Ok(HttpResponse::Ok().json(detail))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    tag = "Restaurants",
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    responses(
        (status = 204, description = "Restaurant and its restaurant_pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorResponse)
    )
)]
#[delete("/{id}")]
async fn delete_restaurant(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let restaurant_id = stored_id(path.into_inner())?;
    if !restaurant::delete_cascade(&data.db, restaurant_id).await? {
        return Err(AppError::restaurant_not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/restaurants")
            .service(get_restaurants)
            .service(get_restaurant_by_id)
            .service(delete_restaurant),
    );
}
