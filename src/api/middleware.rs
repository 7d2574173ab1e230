use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::auth::{AuthService, Claims, Role},
    AppState,
};

// Owned, so no request borrow is held across the authorization awaits.
fn bearer_token(request: &Request) -> AppResult<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or(AppError::Unauthorized)
}

/// Authentication middleware for user-facing routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let claims = authorize_request(&state, &token, Role::User).await?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Authorization middleware for the admin gate. Accepts an admin token, or a
/// user token whose email matches the configured admin email.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)?;
    let claims = authorize_request(&state, &token, Role::Admin).await?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

async fn authorize_request(state: &AppState, token: &str, required: Role) -> AppResult<Claims> {
    let auth_service = AuthService::new(state.db.clone(), (*state.config).clone());
    let claims = auth_service.validate_token(token)?;

    if !auth_service.authorize(&claims, required).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(claims)
}

/// Extract user_id from validated claims.
pub fn get_user_id(claims: &Claims) -> AppResult<Uuid> {
    Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_token_is_extracted_as_owned() {
        let request = request_with_auth(Some("Bearer abc.def.ghi"));
        let token = bearer_token(&request).unwrap();
        // The token outlives the request it was read from.
        drop(request);
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn missing_or_malformed_headers_are_unauthorized() {
        assert!(matches!(
            bearer_token(&request_with_auth(None)),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            bearer_token(&request_with_auth(Some("Basic abc"))),
            Err(AppError::Unauthorized)
        ));
    }
}
