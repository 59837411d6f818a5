use axum::{
    extract::{ConnectInfo, FromRequest, FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;

/// Custom JSON extractor that returns JSON error responses instead of HTML
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = format!("Failed to parse JSON request body: {}", rejection);
                tracing::warn!("{}", message);
                let error_response = json!({ "error": message });
                Err((StatusCode::BAD_REQUEST, Json(error_response)).into_response())
            }
        }
    }
}

/// Network-origin identity of the caller: the first `x-forwarded-for` value
/// when present, otherwise the peer address. This is what rate-limits answer
/// submissions to one per day; it is deliberately not an authenticated
/// identity (shared NAT origins collide).
#[derive(Debug, Clone)]
pub struct ClientIdentity(pub String);

impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIdentity(identity_from_parts(parts)))
    }
}

fn identity_from_parts(parts: &Parts) -> String {
    if let Some(v) = parts.headers.get("x-forwarded-for") {
        if let Ok(s) = v.to_str() {
            // x-forwarded-for can be a comma separated list; take first
            return s.split(',').next().unwrap_or(s).trim().to_string();
        }
    }

    if let Some(ci) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        return ci.0.ip().to_string();
    }

    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts_with_header(name: &str, value: &str) -> Parts {
        let (parts, _) = HttpRequest::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn forwarded_for_takes_first_value() {
        let parts = parts_with_header("x-forwarded-for", "1.2.3.4, 10.0.0.1");
        assert_eq!(identity_from_parts(&parts), "1.2.3.4");
    }

    #[test]
    fn falls_back_to_connect_info() {
        let (mut parts, _) = HttpRequest::builder().body(()).unwrap().into_parts();
        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(identity_from_parts(&parts), "127.0.0.1");
    }

    #[test]
    fn unknown_without_any_origin() {
        let (parts, _) = HttpRequest::builder().body(()).unwrap().into_parts();
        assert_eq!(identity_from_parts(&parts), "unknown");
    }
}
