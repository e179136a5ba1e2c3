//! Anonymous requester identity extraction.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::domain::foundation::OwnerToken;

/// Header carrying the anonymous session identity.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// The caller's optional identity, taken from the `X-Session-Id` header.
///
/// Extraction never fails: a missing, empty, or non-UTF8 header simply
/// yields an anonymous (ownerless) request.
#[derive(Debug, Clone)]
pub struct RequesterIdentity(pub Option<OwnerToken>);

#[async_trait]
impl<S> FromRequestParts<S> for RequesterIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| OwnerToken::new(value).ok());

        Ok(RequesterIdentity(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> RequesterIdentity {
        let (mut parts, _) = request.into_parts();
        RequesterIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn header_becomes_owner_token() {
        let request = Request::builder()
            .header("X-Session-Id", "anon-42")
            .body(())
            .unwrap();

        let identity = extract(request).await;
        assert_eq!(identity.0, Some(OwnerToken::new("anon-42").unwrap()));
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let request = Request::builder().body(()).unwrap();
        let identity = extract(request).await;
        assert!(identity.0.is_none());
    }

    #[tokio::test]
    async fn empty_header_is_anonymous() {
        let request = Request::builder()
            .header("X-Session-Id", "")
            .body(())
            .unwrap();

        let identity = extract(request).await;
        assert!(identity.0.is_none());
    }
}
