use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;

/// The authenticated caller, as established by `SessionAuth`.
///
/// Handlers take it as an argument and hand it to the services explicitly;
/// nothing downstream reads identity from request-scoped state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for Identity {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>().copied() {
            Some(identity) => ready(Ok(identity)),
            None => {
                // Route is not wrapped by SessionAuth, or the middleware rejected it.
                let err = AppError::Unauthorized("Missing session".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_identity_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        let identity = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        req.extensions_mut().insert(identity);

        let mut payload = Payload::None;
        let extracted = Identity::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(extracted, identity);
        assert!(extracted.is_admin());
    }

    #[actix_rt::test]
    async fn test_identity_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();

        let mut payload = Payload::None;
        let result = Identity::from_request(&req, &mut payload).await;

        let err = result.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
