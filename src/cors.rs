//! Cross-origin resource sharing for browser frontends served from another origin.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::Error;

/// Build the CORS layer for the API.
///
/// An empty `allowed_origins` allows requests from any origin. Otherwise only
/// the listed origins, e.g. "https://dashboard.example.com", are allowed.
/// Request headers named in a preflight are mirrored back so that the
/// `Authorization` and `Content-Type` headers may be sent.
///
/// # Errors
/// Returns [Error::InvalidOrigin] if an origin is not a valid header value.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, Error> {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim())
                    .map_err(|_| Error::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request()))
}

#[cfg(test)]
mod tests {
    use axum::http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
        },
    };
    use axum_test::TestServer;

    use crate::{
        Error, build_router,
        test_utils::{get_test_server, get_test_state},
    };

    use super::cors_layer;

    const FRONTEND: &str = "http://localhost:5173";

    #[tokio::test]
    async fn preflight_is_answered_for_any_origin_by_default() {
        let server = get_test_server();

        let response = server
            .method(Method::OPTIONS, "/api/auth/login")
            .add_header(ORIGIN, HeaderValue::from_static(FRONTEND))
            .add_header(
                ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(
            headers[ACCESS_CONTROL_ALLOW_METHODS]
                .to_str()
                .unwrap()
                .contains("POST")
        );
    }

    #[tokio::test]
    async fn simple_request_carries_allow_origin() {
        let server = get_test_server();

        let response = server
            .get("/api/coffee")
            .add_header(ORIGIN, HeaderValue::from_static(FRONTEND))
            .await;

        response.assert_status(StatusCode::IM_A_TEAPOT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn only_listed_origins_are_allowed() {
        let cors = cors_layer(&[FRONTEND.to_owned()]).unwrap();
        let server = TestServer::try_new(build_router(get_test_state(), None, cors)).unwrap();

        let allowed = server
            .get("/api/coffee")
            .add_header(ORIGIN, HeaderValue::from_static(FRONTEND))
            .await;
        let other = server
            .get("/api/coffee")
            .add_header(ORIGIN, HeaderValue::from_static("https://evil.example.com"))
            .await;

        assert_eq!(allowed.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
        assert!(other.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn rejects_invalid_origin() {
        let result = cors_layer(&["http://bad\norigin".to_owned()]);

        assert_eq!(
            result.err(),
            Some(Error::InvalidOrigin("http://bad\norigin".to_owned()))
        );
    }
}
