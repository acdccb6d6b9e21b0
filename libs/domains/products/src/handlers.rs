use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, AuditAction, AuditEvent, AuditOutcome, CurrentUser, SELLER_OR_ADMIN, UuidPath,
    ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, PersistenceErrorResponse,
        UnauthorizedResponse,
    },
};
use domain_brands::BrandRepository;
use domain_categories::CategoryRepository;
use domain_stocks::StockRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

type Service<R, B, C, S> = State<Arc<ProductService<R, B, C, S>>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        add_product,
        get_all_products,
        get_product,
        update_product,
        delete_product,
        get_products_by_brand,
        get_products_by_category,
        get_products_by_sub_category,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            PersistenceErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalogue"))
)]
pub struct ApiDoc;

/// Writes require the SELLER or ADMIN role; reads are public
pub fn router<R, B, C, S>(service: ProductService<R, B, C, S>) -> Router
where
    R: ProductRepository + 'static,
    B: BrandRepository + 'static,
    C: CategoryRepository + 'static,
    S: StockRepository + 'static,
{
    Router::new()
        .route("/", post(add_product))
        .route("/all", get(get_all_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/brand/{id}", get(get_products_by_brand))
        .route("/category/{name}", get(get_products_by_category))
        .route("/subcategory/{name}", get(get_products_by_sub_category))
        .with_state(Arc::new(service))
}

/// List a product and record the caller's stock for it
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product listed", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = PersistenceErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn add_product<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    user: CurrentUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    user.require_any_role(SELLER_OR_ADMIN)?;

    let quantity = input.quantity;
    let product = service.add_product(input, user.user_id()).await?;

    AuditEvent::new(AuditAction::ProductCreate, AuditOutcome::Success)
        .with_user(user.user_id())
        .with_resource("product", product.id)
        .with_client(&headers)
        .with_details(json!({
            "name": product.name,
            "quantity": quantity,
        }))
        .log();

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    responses(
        (status = 200, description = "All live products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_products<R, B, C, S>(
    State(service): Service<R, B, C, S>,
) -> ProductResult<Json<Vec<Product>>>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    Ok(Json(service.get_all_products().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    Ok(Json(service.get_product(id).await?))
}

/// Replace a product's stored fields
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_product<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    user.require_any_role(SELLER_OR_ADMIN)?;
    Ok(Json(service.update_product(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_product<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<StatusCode, AppError>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    user.require_any_role(SELLER_OR_ADMIN)?;
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/brand/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Products of the brand", body = Vec<Product>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_products_by_brand<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    UuidPath(brand_id): UuidPath,
) -> ProductResult<Json<Vec<Product>>>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    Ok(Json(service.get_products_by_brand(brand_id).await?))
}

#[utoipa::path(
    get,
    path = "/category/{name}",
    tag = TAG,
    params(("name" = String, Path, description = "Top-level category name")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_products_by_category<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    Path(name): Path<String>,
) -> ProductResult<Json<Vec<Product>>>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    Ok(Json(service.get_products_by_category(&name).await?))
}

#[utoipa::path(
    get,
    path = "/subcategory/{name}",
    tag = TAG,
    params(("name" = String, Path, description = "Sub-category name")),
    responses(
        (status = 200, description = "Products in the sub-category", body = Vec<Product>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_products_by_sub_category<R, B, C, S>(
    State(service): Service<R, B, C, S>,
    Path(name): Path<String>,
) -> ProductResult<Json<Vec<Product>>>
where
    R: ProductRepository,
    B: BrandRepository,
    C: CategoryRepository,
    S: StockRepository,
{
    Ok(Json(service.get_products_by_sub_category(&name).await?))
}
