use crate::{utils::jwt::verify_jwt, AppState};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// The verified identity-provider subject for this request.
#[derive(Clone)]
pub struct AuthUser {
    pub subject: String,
}

/// Injected on routes that also answer anonymous callers: a valid bearer
/// token yields `Some`, anything else `None`.
#[derive(Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = &auth_header[7..]; // Remove "Bearer " prefix

    let claims =
        verify_jwt(token, &state.identity_secret).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let auth_user = AuthUser {
        subject: claims.sub,
    };

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let subject = request
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|token| verify_jwt(token, &state.identity_secret).ok())
        .map(|claims| claims.sub);

    request
        .extensions_mut()
        .insert(MaybeAuthUser(subject.map(|subject| AuthUser { subject })));

    next.run(request).await
}
