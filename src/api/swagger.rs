use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "CRUD over a single MongoDB collection of users.\n\n**Errors:** every failure returns `{\"message\": \"...\"}` with 400 (malformed id or body), 404 (unknown id on read) or 500 (database failure or timeout)."
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::models::UserPayload,
            crate::models::UserResponse,
            crate::models::InsertResult,
            crate::models::UpdateResult,
            crate::models::DeleteResult,
            crate::utils::error::ErrorBody,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, replace and delete users."),
    )
)]
pub struct ApiDoc;

/// Prefixo usado nas anotações `#[utoipa::path]`
const DOC_BASE: &str = "/users";

impl ApiDoc {
    /// OpenAPI document with paths moved onto the configured `API_URI`.
    pub fn for_base(base: &str) -> utoipa::openapi::OpenApi {
        let mut openapi = Self::openapi();

        let paths = std::mem::take(&mut openapi.paths.paths);
        openapi.paths.paths = paths
            .into_iter()
            .map(|(path, item)| {
                let rest = path.strip_prefix(DOC_BASE).unwrap_or(&path);
                (format!("{}{}", base, rest), item)
            })
            .collect();

        openapi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_base() {
        let openapi = ApiDoc::for_base("/api/v1/people");
        let paths: Vec<&str> = openapi.paths.paths.keys().map(String::as_str).collect();

        assert_eq!(paths, vec!["/api/v1/people", "/api/v1/people/{id}"]);

        let item = &openapi.paths.paths["/api/v1/people/{id}"];
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(item.post.is_none());
    }
}
