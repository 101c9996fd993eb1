mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{redact_uri, Config};
use crate::services::{MongoUserService, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables (.env é obrigatório)
    let env_file = dotenv::from_filename(".env");

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Err(e) = env_file {
        log::error!("❌ Error loading .env file: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()));
    }

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting User Service...");
    log::info!("📊 Database: {}", redact_uri(&config.mongo_uri));
    log::info!("📁 Collection: {}.{}", config.db_name, config.collection_name);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.mongo_uri).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;

    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn UserStore> = Arc::new(MongoUserService::new(
        db,
        config.db_name.clone(),
        config.collection_name.clone(),
    ));
    let store_data = web::Data::from(store);

    let (host, port) = config.bind_address();
    let api_uri = config.api_uri.clone();
    let swagger_ui = config.swagger_ui;

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("👤 Users API at: http://{}:{}{}", host, port, api_uri);
    if swagger_ui {
        log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    }

    // Start HTTP server
    HttpServer::new(move || {
        let api_uri = api_uri.clone();

        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::JsonContentType)
            .wrap(Logger::default())
            .configure(|cfg| {
                if swagger_ui {
                    cfg.service(
                        SwaggerUi::new("/swagger-ui/{_:.*}")
                            .url("/api-docs/openapi.json", api::swagger::ApiDoc::for_base(&api_uri)),
                    );
                }
            })
            .configure(|cfg| api::configure(cfg, &api_uri))
    })
    .bind((host, port))?
    .run()
    .await
}
