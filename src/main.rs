use actix_web::{web, App, HttpServer, middleware::{self, TrailingSlash}};
use dotenvy::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pizza_restaurants::api::{self, ApiDoc, middleware::RequestId};
use pizza_restaurants::app_state::AppState;
use pizza_restaurants::config::Config;
use pizza_restaurants::database::{self, schema};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Failed to load configuration: {}", e),
        )
    })?;

    let db = database::connect_with_settings(&config.database_settings()).await?;
    schema::create_tables(&db)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to create tables: {}", e)))?;

    let state = AppState { db };
    let host = config.host.clone();
    let port = config.port;

    log::info!("Starting server at http://{}:{}", host, port);
    log::info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::new(TrailingSlash::MergeOnly))
            .wrap(RequestId)
            .app_data(web::Data::new(state.clone()))
            .configure(api::init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
