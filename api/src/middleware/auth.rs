//! Token-checking middleware guarding every non-public endpoint.
//!
//! Requests to whitelisted paths pass through untouched. Every other
//! request must carry a `Authorization: Bearer <token>` header whose
//! token verifies against the service keypair; on success the decoded
//! user id is injected into request extensions as [`CurrentUser`],
//! otherwise the request is rejected with `403 Forbidden`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorForbidden,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashSet,
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use us_core::services::token::TokenService;
use us_shared::types::ErrorResponse;

const FORBIDDEN_MESSAGE: &str = "forbidden access";

/// Paths reachable without a token.
fn default_whitelist() -> HashSet<String> {
    ["/auth/login", "/auth/register", "/health"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Identity of the caller, decoded from the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
}

/// Middleware factory for the authentication gate.
pub struct AuthGate {
    token_service: Arc<TokenService>,
    whitelist: Arc<HashSet<String>>,
}

impl AuthGate {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service,
            whitelist: Arc::new(default_whitelist()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            whitelist: Arc::clone(&self.whitelist),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    whitelist: Arc<HashSet<String>>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);
        let whitelist = Arc::clone(&self.whitelist);

        Box::pin(async move {
            if whitelist.contains(req.path()) {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }

            // A missing header or a non-Bearer scheme yields an empty
            // credential, which fails verification like any bad token.
            let token = extract_bearer_token(&req).unwrap_or_default();

            match token_service.verify(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(CurrentUser {
                        user_id: claims.user_id,
                    });
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(_) => {
                    let (request, _) = req.into_parts();
                    let response = HttpResponse::Forbidden()
                        .json(ErrorResponse::new(FORBIDDEN_MESSAGE))
                        .map_into_right_body();
                    Ok(ServiceResponse::new(request, response))
                }
            }
        })
    }
}

/// Extracts the Bearer token from the Authorization header.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| ErrorForbidden(FORBIDDEN_MESSAGE));

        ready(result)
    }
}
