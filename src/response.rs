//! Response builders
//!
//! Small constructors for the handful of responses the server produces.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::HttpConfig;

/// Build the 200 plain-text response carrying a command's labelled output.
///
/// HEAD requests get the same headers with an empty body.
pub fn build_text_response(
    body: String,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let bytes = if is_head {
        Bytes::new()
    } else {
        Bytes::from(body)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", &http_config.default_content_type)
        .header("Content-Length", content_length)
        .header("Server", &http_config.server_name)
        .body(Full::new(bytes))
        .expect("Failed to build response")
}

pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .expect("Failed to build 404 response")
}

pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD")
        .body(Full::new(Bytes::from("Method Not Allowed")))
        .expect("Failed to build 405 response")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            default_content_type: "text/plain; charset=utf-8".to_string(),
            server_name: "cmdecho/0.1".to_string(),
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_text_response() {
        let resp = build_text_response("Jq: jq-1.7\n".to_string(), &test_http_config(), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(resp.headers()["server"], "cmdecho/0.1");
        assert_eq!(body_string(resp).await, "Jq: jq-1.7\n");
    }

    #[tokio::test]
    async fn test_head_response_keeps_length_drops_body() {
        let resp = build_text_response("Jq: jq-1.7\n".to_string(), &test_http_config(), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-length"], "11");
        assert_eq!(body_string(resp).await, "");
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_405_response() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
    }
}
