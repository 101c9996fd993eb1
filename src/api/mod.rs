pub mod swagger;
pub mod users;

use actix_web::web;

use crate::utils::error::AppError;

/// Body JSON inválido vira 400 com `{"message": ...}`.
/// Content-type não é exigido.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .content_type(|_| true)
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

/// Registers the user routes under `base` (already normalized, no trailing `/`).
///
/// | Method | Path          | Handler     |
/// |--------|---------------|-------------|
/// | GET    | `base`        | list_users  |
/// | GET    | `base/{id}`   | get_user    |
/// | POST   | `base`        | create_user |
/// | PUT    | `base/{id}`   | update_user |
/// | DELETE | `base/{id}`   | delete_user |
pub fn configure(cfg: &mut web::ServiceConfig, base: &str) {
    cfg.service(
        web::scope(base)
            .app_data(json_config())
            .route("", web::get().to(users::list_users))
            .route("", web::post().to(users::create_user))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    );
}
