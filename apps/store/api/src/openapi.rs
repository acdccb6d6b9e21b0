use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by protected operations
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::builder().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Back office for products, brands, categories, stock, users, wishlists and carts"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    components(schemas(axum_helpers::ErrorResponse)),
    modifiers(&BearerAuth),
    nest(
        (path = "/api/products/brands", api = domain_brands::ApiDoc),
        (path = "/api/products/stocks", api = domain_stocks::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/user", api = domain_users::ApiDoc),
        (path = "/api/wishlists", api = domain_shopping::WishlistApiDoc),
        (path = "/api/carts", api = domain_shopping::CartApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_domain() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/products/brands",
            "/api/products/stocks/all",
            "/api/products/all",
            "/api/categories",
            "/api/user/login",
            "/api/wishlists",
            "/api/carts",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected} in {paths:?}"
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
