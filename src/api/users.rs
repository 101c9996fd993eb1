use actix_web::{web, HttpResponse};

use crate::{
    models::{parse_object_id, DeleteResult, InsertResult, UpdateResult, UserPayload, UserResponse},
    services::UserStore,
    utils::error::{AppError, ErrorBody},
};

/// GET {API_URI} - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, store order", body = [UserResponse]),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET users - Listing");

    let users: Vec<UserResponse> = store
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    log::info!("✅ Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

/// GET {API_URI}/{id} - Busca usuário pelo id hex
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Hex ObjectId")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No user with this id", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    log::info!("🔍 GET users/{}", id);

    let user = store.get(id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST {API_URI} - Cria usuário; o banco gera o id
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User inserted", body = InsertResult),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let user = body.into_inner().into_user()?;

    log::info!("📝 POST users - Creating");

    let result = store.create(user).await?;

    log::info!("✅ User created: {}", result.inserted_id);
    Ok(HttpResponse::Ok().json(result))
}

/// PUT {API_URI}/{id} - Substitui os quatro campos do usuário
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Hex ObjectId")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Update applied; zero counts when no user matched", body = UpdateResult),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    log::info!("🔧 PUT users/{} - Updating", id);

    let result = store.update(id, body.into_inner().into_fields()).await?;

    if result.matched_count == 0 {
        log::info!("ℹ️  No user matched {}", id);
    }
    Ok(HttpResponse::Ok().json(result))
}

/// DELETE {API_URI}/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Hex ObjectId")),
    responses(
        (status = 200, description = "Delete applied; zero count when no user matched", body = DeleteResult),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 500, description = "Database failure", body = ErrorBody)
    )
)]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    log::info!("🗑️  DELETE users/{}", id);

    let result = store.delete(id).await?;
    Ok(HttpResponse::Ok().json(result))
}
