use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims, Role, TokenIssuer};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account context extracted from the session token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Guard for `/users/staff/*`
pub async fn require_staff(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(&state.tokens, &headers, Role::Staff, request, next).await
}

/// Guard for `/users/admin/*`
pub async fn require_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(&state.tokens, &headers, Role::Admin, request, next).await
}

async fn guard(
    tokens: &TokenIssuer,
    headers: &HeaderMap,
    required: Role,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authorize(tokens, headers, Some(required))?;
    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Resolve the caller from the Authorization header. Missing or invalid tokens
/// are 401; a valid token of the wrong role is 403.
pub fn authorize(tokens: &TokenIssuer, headers: &HeaderMap, required: Option<Role>) -> Result<AuthUser, ApiError> {
    let token = extract_jwt_from_headers(headers)?;
    let claims = tokens.verify(&token)?;
    let auth_user = AuthUser::from(claims);

    if let Some(required) = required {
        if !auth_user.role.satisfies(required) {
            tracing::warn!("Account {} ({}) denied access to {} routes", auth_user.id, auth_user.role, required);
            return Err(AuthError::Forbidden {
                required: required.to_string(),
                actual: auth_user.role.to_string(),
            }
            .into());
        }
    }

    Ok(auth_user)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers.get("authorization").ok_or(AuthError::TokenMissing)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::TokenInvalid("Authorization header is not valid text".to_string()))?;

    match auth_str.strip_prefix("Bearer ").map(str::trim) {
        Some("") => Err(AuthError::TokenInvalid("empty bearer token".to_string())),
        Some(token) => Ok(token.to_string()),
        None => Err(AuthError::TokenInvalid(
            "Authorization header must use Bearer token format".to_string(),
        )),
    }
}
