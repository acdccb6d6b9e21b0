//! Route composition. `create_router` adds the `/api` prefix.

pub mod health;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum_helpers::optional_jwt_auth_middleware;
use domain_brands::{BrandService, PgBrandRepository};
use domain_categories::{CategoryService, PgCategoryRepository};
use domain_products::{PgProductRepository, ProductService};
use domain_shopping::{
    CartService, PgCartRepository, PgWishlistRepository, WishlistService, cart_router,
    wishlist_router,
};
use domain_stocks::{PgStockRepository, StockService};
use domain_users::{PgUserRepository, UserService};

use crate::state::AppState;

/// Every domain router over the shared pool, with bearer tokens decoded when present
pub fn routes(state: &AppState) -> Router {
    let db = &state.db;

    let brands = BrandService::new(PgBrandRepository::new(db.clone()));
    let categories = CategoryService::new(PgCategoryRepository::new(db.clone()));
    let stocks = StockService::new(PgStockRepository::new(db.clone()));
    let products = ProductService::new(
        PgProductRepository::new(db.clone()),
        brands.clone(),
        categories.clone(),
        stocks.clone(),
    );

    let wishlists = WishlistService::new(
        PgWishlistRepository::new(db.clone()),
        PgProductRepository::new(db.clone()),
    );
    let carts = CartService::new(
        PgCartRepository::new(db.clone()),
        PgProductRepository::new(db.clone()),
    );
    let users = UserService::new(
        PgUserRepository::new(db.clone()),
        PgWishlistRepository::new(db.clone()),
        PgCartRepository::new(db.clone()),
        state.jwt.clone(),
    );

    Router::new()
        .nest("/products/brands", domain_brands::handlers::router(brands))
        .nest("/products/stocks", domain_stocks::handlers::router(stocks))
        .nest("/products", domain_products::handlers::router(products))
        .nest("/categories", domain_categories::handlers::router(categories))
        .nest("/user", domain_users::handlers::router(users))
        .nest("/wishlists", wishlist_router(wishlists))
        .nest("/carts", cart_router(carts))
        .layer(from_fn_with_state(state.jwt.clone(), optional_jwt_auth_middleware))
}

/// `/ready`, merged next to `/health` outside `/api`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{JwtAuth, JwtConfig};
    use core_config::{Environment, app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    use crate::config::Config;

    const SECRET: &str = "store-api-routes-secret-32-characters";

    // Every request below is answered before any query reaches the pool
    fn app() -> Router {
        let jwt = JwtConfig::new(SECRET);
        let state = AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgresql://localhost/store"),
                server: ServerConfig::default(),
                jwt: jwt.clone(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            jwt: JwtAuth::new(&jwt),
        };
        routes(&state)
    }

    async fn call(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_brand_id_must_be_uuid() {
        let (status, body) = call("/products/brands/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_object());
    }

    #[tokio::test]
    async fn test_seller_stocks_need_token() {
        let (status, _) = call("/products/stocks/seller").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_product_id_must_be_uuid() {
        let (status, _) = call("/products/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_user_id_must_be_uuid() {
        let (status, _) = call("/user/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_shopping_routes_need_token() {
        for uri in ["/wishlists", "/carts"] {
            let (status, _) = call(uri).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }
}
