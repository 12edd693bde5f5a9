use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Library API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Accounts API",
        description = "Patron self-service and staff user management"
    ),
    modifiers(&AccountsApi, &BearerAuth)
)]
pub struct ApiDoc;

/// Account and user endpoints; their paths are already absolute.
struct AccountsApi;

impl Modify for AccountsApi {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_accounts::handlers::ApiDoc::openapi());
    }
}

/// Identity-provider JWT in the Authorization header
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_includes_account_paths_and_auth() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/account"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("UserProjection"));
    }
}
