//! OpenAPI 3.0 documentation assembly
//!
//! Swagger UI is served from `/swagger-ui` outside production.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "Per-user todo lists and items behind bearer-token authentication"
    ),
    tags(
        (name = "System", description = "Health checks"),
        (name = "Users", description = "Registration, authentication and password management"),
        (name = "Todo Lists", description = "Todo lists owned by the caller"),
        (name = "Todo Items", description = "Items inside the caller's todo lists"),
    ),
    components(
        schemas(
            crate::api::BaseResponse,
            crate::domain::StringUuid,
            crate::domain::CreateTodoListInput,
            crate::domain::UpdateTodoListInput,
            crate::domain::TodoListResponse,
            crate::domain::CreateTodoItemInput,
            crate::domain::UpdateTodoItemInput,
            crate::domain::TodoItemResponse,
            crate::domain::RegisterUserInput,
            crate::domain::AuthenticateUserInput,
            crate::domain::AuthenticateUserResponse,
            crate::domain::ChangePasswordInput,
            crate::api::health::HealthResponse,
        ),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,

        crate::api::user::register,
        crate::api::user::authenticate,
        crate::api::user::change_password,

        crate::api::todo_list::list,
        crate::api::todo_list::create,
        crate::api::todo_list::update,
        crate::api::todo_list::delete,
        crate::api::todo_list::list_items,

        crate::api::todo_item::create,
        crate::api::todo_item::update,
        crate::api::todo_item::delete,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// OpenAPI document with the bearer scheme registered
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
        doc
    }
}
