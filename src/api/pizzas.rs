use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    database::models::{PizzaSummary, pizza},
    errors::AppError,
};

#[utoipa::path(
    get,
    path = "/pizzas",
    tag = "Pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [PizzaSummary])
    )
)]
#[get("")]
async fn get_pizzas(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let pizzas = pizza::list(&data.db).await?;
    Ok(HttpResponse::Ok().json(pizzas))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/pizzas").service(get_pizzas));
}
