use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use super::SESSION_COOKIE;
use crate::app::AppState;
use crate::error::AppError;

/// Resolves the session cookie into an [`Identity`](super::Identity) and stores
/// it in the request extensions. Requests without a live session are rejected
/// with 401 before reaching the handler.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthService {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .cookie(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|token| !token.is_empty())
                .ok_or_else(|| AppError::Unauthorized("Missing session".into()))?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::InternalServerError("AppState is not registered".into()))?;

            let identity = state.sessions.authenticate(&token, Utc::now()).await?;
            log::debug!("{} {} as {}", req.method(), req.path(), identity.user_id);

            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}
