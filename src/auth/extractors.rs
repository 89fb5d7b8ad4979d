use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use super::claims::Claims;
use crate::config::JwtConfig;
use crate::state::AppState;

/// Validates the bearer JWT and yields the acting user's ID.
///
/// Tokens are minted by the identity service; this crate only verifies them.
#[derive(Debug)]
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, "missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".into()))?;

        let claims = verify_token(&state.config.jwt, token)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid or expired token".to_string()))?;

        Ok(AuthUser(claims.sub))
    }
}

fn verify_token(cfg: &JwtConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_audience(std::slice::from_ref(&cfg.audience));
    validation.set_issuer(std::slice::from_ref(&cfg.issuer));
    let decoding = DecodingKey::from_secret(cfg.secret.as_bytes());
    let data = decode::<Claims>(token, &decoding, &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn unix_now() -> usize {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock after epoch")
            .as_secs() as usize
    }

    fn sign_token(secret: &str, sub: i64) -> String {
        let now = unix_now();
        let claims = Claims {
            sub,
            iat: now,
            exp: now + 300,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("sign token")
    }

    async fn extract(header: Option<String>) -> Result<AuthUser, (StatusCode, String)> {
        let state = AppState::fake();
        let mut builder = Request::builder().uri("/rocks");
        if let Some(value) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder.body(()).expect("build request").into_parts();
        AuthUser::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let token = sign_token("test-secret", 42);
        let AuthUser(user_id) = extract(Some(format!("Bearer {token}")))
            .await
            .expect("valid token accepted");
        assert_eq!(user_id, 42);
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let (status, _) = extract(None).await.unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let (status, reason) = extract(Some("Basic abc123".into())).await.unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(reason, "invalid auth scheme");
    }

    #[tokio::test]
    async fn rejects_token_signed_with_wrong_secret() {
        let token = sign_token("other-secret", 42);
        let (status, _) = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let now = unix_now();
        let claims = Claims {
            sub: 42,
            iat: now - 600,
            exp: now - 300,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("sign token");
        let (status, _) = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
