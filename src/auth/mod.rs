/*!
 * # Authentication Module
 *
 * Drivers sign in with their employee id and password and receive an HS256 JWT.
 * The token travels in the `Authorization: Bearer` header; the `authToken` cookie
 * set at login is accepted when the header is absent.
 *
 * [`auth_middleware`] validates the token and stores an [`AuthUser`] in the request
 * extensions, where handlers pick it up through the [`AuthUser`] extractor.
 */

use crate::config::AppConfig;
use crate::errors::ServiceError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration as ChronoDuration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const AUTH_COOKIE_NAME: &str = "authToken";

/// Claim structure for driver JWTs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub emp_id: String,
    /// collectionofficer.id of the driver
    pub id: i32,
    pub password_updated: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated driver extracted from the JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub officer_id: i32,
    pub emp_id: String,
    pub password_updated: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            officer_id: claims.id,
            emp_id: claims.emp_id,
            password_updated: claims.password_updated,
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_lifetime: Duration,
    pub bcrypt_cost: u32,
    pub secure_cookie: bool,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_lifetime: Duration, bcrypt_cost: u32) -> Self {
        Self {
            jwt_secret,
            token_lifetime,
            bcrypt_cost,
            secure_cookie: false,
        }
    }
}

impl From<&AppConfig> for AuthConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            jwt_secret: cfg.jwt_secret.clone(),
            token_lifetime: Duration::from_secs(cfg.jwt_expiration_secs),
            bcrypt_cost: cfg.bcrypt_cost,
            secure_cookie: cfg.is_production(),
        }
    }
}

/// A freshly signed token and the moment it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Token issuance, token validation and password hashing
#[derive(Debug, Clone)]
pub struct AuthService {
    pub config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Sign a token for the given driver
    pub fn generate_token(
        &self,
        emp_id: &str,
        officer_id: i32,
        password_updated: bool,
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let lifetime = ChronoDuration::from_std(self.config.token_lifetime)
            .map_err(|_| AuthError::TokenCreation("Invalid token duration".to_string()))?;

        let claims = Claims {
            emp_id: emp_id.to_string(),
            id: officer_id,
            password_updated,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let token = self.encode_claims(&claims)?;
        Ok(IssuedToken {
            token,
            expires_in: lifetime.num_seconds(),
        })
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a JWT and extract the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }

    /// `Set-Cookie` value carrying the token for browser clients
    pub fn auth_cookie(&self, token: &IssuedToken) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE_NAME, token.token.clone()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.config.secure_cookie)
            .path("/")
            .max_age(cookie::time::Duration::seconds(token.expires_in))
            .build()
    }

    /// bcrypt hash at the configured cost; runs on the blocking pool
    pub async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let cost = self.config.bcrypt_cost;
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServiceError::InternalError(format!("hashing task failed: {}", e)))?
            .map_err(ServiceError::from)
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServiceError::InternalError(format!("hashing task failed: {}", e)))?
            .map_err(ServiceError::from)
    }
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenCreation(msg) => ServiceError::InternalError(msg),
            other => ServiceError::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::TokenCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        let message = match &self {
            Self::TokenCreation(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(serde_json::json!({
            "status": "error",
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
            "request_id": crate::tracing::current_request_id().map(|rid| rid.to_string()),
            "timestamp": Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Token from the bearer header, falling back to the `authToken` cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw.to_owned()).filter_map(Result::ok))
        .find(|cookie| cookie.name() == AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates the driver token
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        debug!("request without auth token");
        return AuthError::MissingToken.into_response();
    };

    match auth_service.validate_token(&token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser::from(claims));
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "token verification failed");
            e.into_response()
        }
    }
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self, auth_service: Arc<AuthService>) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self, auth_service: Arc<AuthService>) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            auth_service,
            auth_middleware,
        ))
    }
}
