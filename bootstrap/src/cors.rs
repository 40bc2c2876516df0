//! CORS 配置

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use sweetshop_config::CorsConfig;
use sweetshop_errors::{AppError, AppResult};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// 列表接口返回的总数响应头
pub const X_TOTAL_COUNT: &str = "x-total-count";

/// 根据配置构建 CORS 层
///
/// 允许携带凭证，因此来源必须显式列出，不接受通配符
pub fn cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            if origin == "*" {
                return Err(AppError::internal(
                    "CORS origin '*' cannot be combined with credentials",
                ));
            }
            HeaderValue::from_str(origin)
                .map_err(|_| AppError::internal(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([
            header::CONTENT_LENGTH,
            HeaderName::from_static(X_TOTAL_COUNT),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(config.max_age_secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/sweets", get(|| async { "[]" }))
            .layer(cors_layer(&CorsConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_preflight_from_allowed_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/sweets")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "600");
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("PUT"));
        assert!(methods.contains("DELETE"));
    }

    #[tokio::test]
    async fn test_disallowed_origin_gets_no_cors_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/sweets")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[test]
    fn test_wildcard_origin_rejected() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            max_age_secs: 600,
        };
        assert!(cors_layer(&config).is_err());
    }
}
