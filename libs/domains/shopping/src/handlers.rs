use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_helpers::{
    AppError, CurrentUser, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_products::{Product, ProductRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{AddToCart, Cart, CartItem, Wishlist};
use crate::repository::{CartRepository, WishlistRepository};
use crate::service::{CartService, WishlistService};

const WISHLIST_TAG: &str = "wishlists";
const CART_TAG: &str = "carts";

/// Mounted at `/wishlists`
#[derive(OpenApi)]
#[openapi(
    paths(
        get_my_wishlist,
        get_wishlist,
        get_wishlist_products,
        add_to_wishlist,
        remove_from_wishlist
    ),
    components(
        schemas(Wishlist),
        responses(
            NotFoundResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = WISHLIST_TAG, description = "The caller's wishlist"))
)]
pub struct WishlistApiDoc;

/// Mounted at `/carts`
#[derive(OpenApi)]
#[openapi(
    paths(get_my_cart, add_to_cart, remove_from_cart),
    components(
        schemas(Cart, CartItem, AddToCart),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = CART_TAG, description = "The caller's cart"))
)]
pub struct CartApiDoc;

type Wishlists<W, P> = State<Arc<WishlistService<W, P>>>;
type Carts<C, P> = State<Arc<CartService<C, P>>>;

/// Mounted at `/wishlists`; every route needs a bearer token
pub fn wishlist_router<W, P>(service: WishlistService<W, P>) -> Router
where
    W: WishlistRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(get_my_wishlist))
        .route("/products", get(get_wishlist_products))
        .route(
            "/products/{product_id}",
            post(add_to_wishlist).delete(remove_from_wishlist),
        )
        .route("/{id}", get(get_wishlist))
        .with_state(Arc::new(service))
}

/// Mounted at `/carts`; every route needs a bearer token
pub fn cart_router<C, P>(service: CartService<C, P>) -> Router
where
    C: CartRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route("/", get(get_my_cart))
        .route(
            "/products/{product_id}",
            post(add_to_cart).delete(remove_from_cart),
        )
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "",
    tag = WISHLIST_TAG,
    responses(
        (status = 200, description = "Caller's wishlist", body = Wishlist),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_my_wishlist<W: WishlistRepository, P: ProductRepository>(
    State(service): Wishlists<W, P>,
    user: CurrentUser,
) -> Result<Json<Wishlist>, AppError> {
    Ok(Json(service.get_my_wishlist(user.user_id()).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = WISHLIST_TAG,
    params(("id" = Uuid, Path, description = "Wishlist ID")),
    responses(
        (status = 200, description = "Wishlist found", body = Wishlist),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_wishlist<W: WishlistRepository, P: ProductRepository>(
    State(service): Wishlists<W, P>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Wishlist>, AppError> {
    Ok(Json(service.get_wishlist(id, user.user_id()).await?))
}

/// Saved products that are still listed
#[utoipa::path(
    get,
    path = "/products",
    tag = WISHLIST_TAG,
    responses(
        (status = 200, description = "Products in the caller's wishlist", body = Vec<Product>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_wishlist_products<W: WishlistRepository, P: ProductRepository>(
    State(service): Wishlists<W, P>,
    user: CurrentUser,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(service.get_wishlist_products(user.user_id()).await?))
}

#[utoipa::path(
    post,
    path = "/products/{product_id}",
    tag = WISHLIST_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product saved", body = Wishlist),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn add_to_wishlist<W: WishlistRepository, P: ProductRepository>(
    State(service): Wishlists<W, P>,
    user: CurrentUser,
    UuidPath(product_id): UuidPath,
) -> Result<Json<Wishlist>, AppError> {
    Ok(Json(
        service
            .add_product_to_wishlist(user.user_id(), product_id)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = WISHLIST_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product removed"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn remove_from_wishlist<W: WishlistRepository, P: ProductRepository>(
    State(service): Wishlists<W, P>,
    user: CurrentUser,
    UuidPath(product_id): UuidPath,
) -> Result<StatusCode, AppError> {
    service
        .remove_product_from_wishlist(user.user_id(), product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Caller's cart", body = Cart),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_my_cart<C: CartRepository, P: ProductRepository>(
    State(service): Carts<C, P>,
    user: CurrentUser,
) -> Result<Json<Cart>, AppError> {
    Ok(Json(service.get_my_cart(user.user_id()).await?))
}

/// Adds to the quantity already in the cart
#[utoipa::path(
    post,
    path = "/products/{product_id}",
    tag = CART_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = AddToCart,
    responses(
        (status = 200, description = "Cart updated", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn add_to_cart<C: CartRepository, P: ProductRepository>(
    State(service): Carts<C, P>,
    user: CurrentUser,
    UuidPath(product_id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> Result<Json<Cart>, AppError> {
    Ok(Json(
        service
            .add_product_to_cart(user.user_id(), product_id, input)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = CART_TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product removed"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn remove_from_cart<C: CartRepository, P: ProductRepository>(
    State(service): Carts<C, P>,
    user: CurrentUser,
    UuidPath(product_id): UuidPath,
) -> Result<StatusCode, AppError> {
    service
        .remove_product_from_cart(user.user_id(), product_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
