use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppError, AuditAction, AuditEvent, AuditOutcome, CurrentUser, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_shopping::{CartRepository, WishlistRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserError;
use crate::models::{
    Address, CreateAddress, CreateUser, LoginRequest, LoginResponse, MessageResponse, RoleType,
    UpdateUser, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

type Service<R, W, C> = State<Arc<UserService<R, W, C>>>;

#[derive(OpenApi)]
#[openapi(
    paths(
        create_user,
        get_all_users,
        get_user,
        update_user,
        delete_user,
        login,
        add_address,
        get_my_addresses,
        get_address,
        delete_address
    ),
    components(
        schemas(
            UserResponse,
            CreateUser,
            UpdateUser,
            RoleType,
            Address,
            CreateAddress,
            LoginRequest,
            LoginResponse,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Accounts, addresses and login"))
)]
pub struct ApiDoc;

/// Signup, login and reads are public; profile and address changes need a bearer token
pub fn router<R, W, C>(service: UserService<R, W, C>) -> Router
where
    R: UserRepository + 'static,
    W: WishlistRepository + 'static,
    C: CartRepository + 'static,
{
    Router::new()
        .route("/", post(create_user).get(get_all_users).put(update_user))
        .route("/login", post(login))
        .route("/addresses", post(add_address).get(get_my_addresses))
        .route("/addresses/{id}", get(get_address).delete(delete_address))
        .route("/{id}", get(get_user).delete(delete_user))
        .with_state(Arc::new(service))
}

/// Sign up; customers also get a wishlist and a cart
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse)
    )
)]
async fn create_user<R, W, C>(
    State(service): Service<R, W, C>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<impl IntoResponse, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let user = service.create_user(input).await?;

    AuditEvent::new(AuditAction::UserSignup, AuditOutcome::Success)
        .with_user(user.id)
        .with_resource("user", user.id)
        .with_client(&headers)
        .with_details(&user.roles)
        .log();

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses((status = 200, description = "All live users", body = Vec<UserResponse>))
)]
async fn get_all_users<R, W, C>(
    State(service): Service<R, W, C>,
) -> Result<Json<Vec<UserResponse>>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let users = service.get_all_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_user<R, W, C>(
    State(service): Service<R, W, C>,
    UuidPath(id): UuidPath,
) -> Result<Json<UserResponse>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    Ok(Json(service.get_user(id).await?.into()))
}

/// Replace the caller's profile
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_user<R, W, C>(
    State(service): Service<R, W, C>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<Json<UserResponse>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    Ok(Json(service.update_user(user.user_id(), input).await?.into()))
}

/// Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID, must be the caller's")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_user<R, W, C>(
    State(service): Service<R, W, C>,
    user: CurrentUser,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> Result<Json<MessageResponse>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let result = service.delete_user(user.user_id(), id).await;

    let outcome = if result.is_ok() {
        AuditOutcome::Success
    } else {
        AuditOutcome::Denied
    };
    AuditEvent::new(AuditAction::UserDelete, outcome)
        .with_user(user.user_id())
        .with_resource("user", id)
        .with_client(&headers)
        .log();

    Ok(Json(MessageResponse::new(result?)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = LoginResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn login<R, W, C>(
    State(service): Service<R, W, C>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let email = input.email.clone();

    match service.login(input).await {
        Ok((user, response)) => {
            AuditEvent::new(AuditAction::UserLogin, AuditOutcome::Success)
                .with_user(user.id)
                .with_client(&headers)
                .log();
            Ok(Json(response))
        }
        Err(err) => {
            if matches!(err, UserError::InvalidCredentials) {
                AuditEvent::new(AuditAction::UserLogin, AuditOutcome::Failure)
                    .with_client(&headers)
                    .with_details(serde_json::json!({ "email": email }))
                    .log();
            }
            Err(err.into())
        }
    }
}

#[utoipa::path(
    post,
    path = "/addresses",
    tag = TAG,
    request_body = CreateAddress,
    responses(
        (status = 201, description = "Address added", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn add_address<R, W, C>(
    State(service): Service<R, W, C>,
    user: CurrentUser,
    ValidatedJson(input): ValidatedJson<CreateAddress>,
) -> Result<impl IntoResponse, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let message = service.add_address(user.user_id(), input).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new(message))))
}

#[utoipa::path(
    get,
    path = "/addresses",
    tag = TAG,
    responses(
        (status = 200, description = "Caller's addresses", body = Vec<Address>),
        (status = 401, response = UnauthorizedResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_my_addresses<R, W, C>(
    State(service): Service<R, W, C>,
    user: CurrentUser,
) -> Result<Json<Vec<Address>>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    Ok(Json(service.get_my_addresses(user.user_id()).await?))
}

#[utoipa::path(
    get,
    path = "/addresses/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address found", body = Address),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_address<R, W, C>(
    State(service): Service<R, W, C>,
    _user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<Json<Address>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    Ok(Json(service.get_address(id).await?))
}

#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Address ID")),
    responses(
        (status = 200, description = "Address deleted", body = MessageResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_address<R, W, C>(
    State(service): Service<R, W, C>,
    user: CurrentUser,
    UuidPath(id): UuidPath,
) -> Result<Json<MessageResponse>, AppError>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    let message = service.delete_address(user.user_id(), id).await?;
    Ok(Json(MessageResponse::new(message)))
}
