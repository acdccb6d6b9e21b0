use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{
    AppError, CurrentUser, SELLER_OR_ADMIN, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Stock, UpdateStock};
use crate::repository::StockRepository;
use crate::service::StockService;

const TAG: &str = "stocks";

#[derive(OpenApi)]
#[openapi(
    paths(get_stocks, get_stocks_by_seller, get_stocks_by_product, get_stock, update_stock, delete_stock),
    components(
        schemas(Stock, UpdateStock),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Seller stock, requires the SELLER or ADMIN role"))
)]
pub struct ApiDoc;

/// Every route requires a caller with the SELLER or ADMIN role
pub fn router<R: StockRepository + 'static>(service: StockService<R>) -> Router {
    Router::new()
        .route("/all", get(get_stocks))
        .route("/seller", get(get_stocks_by_seller))
        .route("/product/{id}", get(get_stocks_by_product))
        .route(
            "/{id}",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    responses(
        (status = 200, description = "All live stock", body = Vec<Stock>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_stocks<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
) -> Result<Json<Vec<Stock>>, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.get_stocks().await?))
}

/// Stock held by the caller
#[utoipa::path(
    get,
    path = "/seller",
    tag = TAG,
    responses(
        (status = 200, description = "Caller's stock", body = Vec<Stock>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_stocks_by_seller<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
) -> Result<Json<Vec<Stock>>, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.get_stocks_by_seller(user.user_id()).await?))
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock for the product", body = Vec<Stock>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_stocks_by_product<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
    UuidPath(product_id): UuidPath,
) -> Result<Json<Vec<Stock>>, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.get_stocks_by_product(product_id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Stock ID")),
    responses(
        (status = 200, description = "Stock found", body = Stock),
        (status = 404, response = NotFoundResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Stock>, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.get_stock(id).await?))
}

/// Replace the held quantity
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Stock ID")),
    request_body = UpdateStock,
    responses(
        (status = 200, description = "Stock updated", body = Stock),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateStock>,
) -> Result<Json<Stock>, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.update_stock(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Stock ID")),
    responses(
        (status = 204, description = "Stock deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 403, response = ForbiddenResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError> {
    user.require_any_role(SELLER_OR_ADMIN)?;
    service.delete_stock(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
