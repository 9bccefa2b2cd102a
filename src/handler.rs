//! Request handler
//!
//! Dispatch is deliberately simple: exact path match against the route
//! table, one subprocess invocation per matched request, labelled output
//! back to the client.

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::command;
use crate::config::AppState;
use crate::logger;
use crate::response;

/// Check HTTP method and return an early response if not GET/HEAD.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::build_405_response())
        }
    }
}

pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let access_log = state.cached_access_log.load(Ordering::Relaxed);
    if access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    let response = respond(req.method(), req.uri().path(), &state).await;

    if access_log {
        let size = response.body().size_hint().exact().unwrap_or(0);
        logger::log_response(
            response.status().as_u16(),
            usize::try_from(size).unwrap_or(usize::MAX),
        );
    }

    Ok(response)
}

/// Resolve a method/path pair to a response.
///
/// A registered path runs its command and embeds whatever stdout was
/// captured. Anything else is a plain 404.
async fn respond(method: &Method, path: &str, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(method) {
        return resp;
    }
    let is_head = *method == Method::HEAD;

    match state.routes.lookup(path) {
        Some(route) => {
            let output = command::run_command(&route.command).await;
            let body = format!("{}: {}", route.label, output);
            response::build_text_response(body, &state.config.http, is_head)
        }
        None => response::build_404_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes::Route;
    use http_body_util::BodyExt;

    fn test_state(routes: Vec<Route>) -> Arc<AppState> {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.routes = routes;
        Arc::new(AppState::new(cfg).unwrap())
    }

    fn echo_route(path: &str, label: &str, text: &str) -> Route {
        Route {
            path: path.to_string(),
            label: label.to_string(),
            command: vec!["echo".to_string(), text.to_string()],
        }
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_registered_path_returns_labelled_output() {
        let state = test_state(vec![echo_route("/jq", "Jq", "jq-1.7")]);
        let resp = respond(&Method::GET, "/jq", &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_string(resp).await, "Jq: jq-1.7\n");
    }

    #[tokio::test]
    async fn test_body_starts_with_label_and_separator() {
        let state = test_state(vec![echo_route("/zsh", "zsh", "zsh 5.9")]);
        let resp = respond(&Method::GET, "/zsh", &state).await;
        assert!(body_string(resp).await.starts_with("zsh: "));
    }

    #[tokio::test]
    async fn test_unregistered_path_returns_404() {
        let state = test_state(vec![echo_route("/jq", "Jq", "jq-1.7")]);
        let resp = respond(&Method::GET, "/nope", &state).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_failed_command_still_returns_200_with_label() {
        let state = test_state(vec![Route {
            path: "/broken".to_string(),
            label: "Broken".to_string(),
            command: vec!["definitely-not-a-real-binary-1234".to_string()],
        }]);
        let resp = respond(&Method::GET, "/broken", &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "Broken: ");
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let state = test_state(vec![echo_route("/jq", "Jq", "jq-1.7")]);
        let resp = respond(&Method::POST, "/jq", &state).await;
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn test_head_returns_no_body() {
        let state = test_state(vec![echo_route("/jq", "Jq", "jq-1.7")]);
        let resp = respond(&Method::HEAD, "/jq", &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "");
    }
}
