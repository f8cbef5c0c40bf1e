use actix_web::{get, web, HttpResponse};

#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses(
        (status = 200, description = "Static greeting page", content_type = "text/html", body = String)
    )
)]
#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Code challenge</h1>")
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
