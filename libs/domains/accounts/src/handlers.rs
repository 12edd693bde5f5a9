use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::authz::{RoleGate, require_role};
use crate::error::AccountResult;
use crate::models::{Book, BookBorrow, ModifyUser, NewUser, ProfileUpdate, User};
use crate::principal::Principal;
use crate::projection::UserProjection;
use crate::repository::UserRepository;
use crate::role::Role;
use crate::service::DirectoryService;

const ACCOUNT_TAG: &str = "account";
const USERS_TAG: &str = "users";

/// OpenAPI documentation for the account and user management endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        get_account,
        update_account,
        list_users,
        get_user,
        create_user,
        modify_user,
        delete_user,
    ),
    components(
        schemas(UserProjection, User, Role, Book, BookBorrow, NewUser, ProfileUpdate, ModifyUser),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ACCOUNT_TAG, description = "Self-service profile of the calling patron"),
        (name = USERS_TAG, description = "Staff management of patron accounts")
    )
)]
pub struct ApiDoc;

type SharedService<R> = Arc<DirectoryService<R>>;

/// `/account` (self-service) and `/users` (role-gated) routes.
///
/// Expects `JwtClaims` in request extensions, as left by
/// `axum_helpers::jwt_auth_middleware`.
pub fn router<R: UserRepository + 'static>(service: DirectoryService<R>, gate: RoleGate) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest("/account", account_router(shared_service.clone()))
        .nest("/users", users_router(shared_service, gate))
}

fn account_router<R: UserRepository + 'static>(service: SharedService<R>) -> Router {
    Router::new()
        .route("/", get(get_account).post(update_account))
        .with_state(service)
}

fn users_router<R: UserRepository + 'static>(service: SharedService<R>, gate: RoleGate) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user).put(modify_user))
        .route("/{id}", get(get_user).delete(delete_user))
        // route_layer: unmatched paths still 404 instead of 403
        .route_layer(middleware::from_fn_with_state(gate, require_role))
        .with_state(service)
}

/// Read the caller's own profile
#[utoipa::path(
    get,
    path = "/account",
    tag = ACCOUNT_TAG,
    responses(
        (status = 200, description = "Caller's profile", body = UserProjection),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_account<R: UserRepository>(
    State(service): State<SharedService<R>>,
    principal: Principal,
) -> AccountResult<Json<UserProjection>> {
    let user = service.get_by_username(principal.username()).await?;
    Ok(Json(UserProjection::self_service(&user)))
}

/// Update the caller's username, password and names
#[utoipa::path(
    post,
    path = "/account",
    tag = ACCOUNT_TAG,
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = UserProjection),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_account<R: UserRepository>(
    State(service): State<SharedService<R>>,
    principal: Principal,
    ValidatedJson(patch): ValidatedJson<ProfileUpdate>,
) -> AccountResult<Json<UserProjection>> {
    let user = service.change_user_data(principal.username(), patch).await?;
    Ok(Json(UserProjection::self_service(&user)))
}

/// List every patron with their borrowed books
#[utoipa::path(
    get,
    path = "/users",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserProjection>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_users<R: UserRepository>(
    State(service): State<SharedService<R>>,
) -> AccountResult<Json<Vec<UserProjection>>> {
    let users = service.get_all().await?;
    Ok(Json(users.iter().map(UserProjection::administrative).collect()))
}

/// Get a full user record by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn get_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(id): Path<i64>,
) -> AccountResult<Json<User>> {
    let user = service.get_by_id(id).await?;
    Ok(Json(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = USERS_TAG,
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn create_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> AccountResult<impl IntoResponse> {
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace any field of any user, including roles
#[utoipa::path(
    put,
    path = "/users",
    tag = USERS_TAG,
    request_body = ModifyUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn modify_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    ValidatedJson(input): ValidatedJson<ModifyUser>,
) -> AccountResult<Json<User>> {
    let user = service.modify(input).await?;
    Ok(Json(user))
}

/// Delete a user by id
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted (or already absent)"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn delete_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    Path(id): Path<i64>,
) -> AccountResult<impl IntoResponse> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
