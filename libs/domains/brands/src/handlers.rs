use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BrandResult;
use crate::models::{Brand, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;
use crate::service::BrandService;

const TAG: &str = "brands";

#[derive(OpenApi)]
#[openapi(
    paths(add_brand, get_all_brands, get_brand, update_brand, delete_brand),
    components(
        schemas(Brand, CreateBrand, UpdateBrand),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Brand management"))
)]
pub struct ApiDoc;

pub fn router<R: BrandRepository + 'static>(service: BrandService<R>) -> Router {
    Router::new()
        .route("/", post(add_brand))
        .route("/all", get(get_all_brands))
        .route(
            "/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .with_state(Arc::new(service))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBrand,
    responses(
        (status = 201, description = "Brand created", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> BrandResult<impl IntoResponse> {
    let brand = service.add_brand(input).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// List brands
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    responses(
        (status = 200, description = "All live brands", body = Vec<Brand>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_all_brands<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
) -> BrandResult<Json<Vec<Brand>>> {
    Ok(Json(service.get_all_brands().await?))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
) -> BrandResult<Json<Brand>> {
    Ok(Json(service.get_brand(id).await?))
}

/// Replace a brand
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = UpdateBrand,
    responses(
        (status = 200, description = "Brand updated", body = Brand),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn update_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> BrandResult<Json<Brand>> {
    Ok(Json(service.update_brand(id, input).await?))
}

/// Soft-delete a brand
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn delete_brand<R: BrandRepository>(
    State(service): State<Arc<BrandService<R>>>,
    UuidPath(id): UuidPath,
) -> BrandResult<StatusCode> {
    service.delete_brand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
