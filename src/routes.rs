//! Route table module
//!
//! A route is a static mapping from an HTTP path to an external command and
//! a response label. The table is built once at startup and never mutated.

use serde::Deserialize;

/// One registered path and the command it echoes.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Route {
    /// Exact request path, e.g. `/jq`
    pub path: String,
    /// Label prepended to the response body, e.g. `Jq`
    pub label: String,
    /// Command argv; the first element is the program
    pub command: Vec<String>,
}

/// Immutable lookup table over the configured routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths.
    ///
    /// Each registered path must resolve to exactly one command, so a
    /// config that binds the same path twice is a startup error.
    pub fn new(routes: Vec<Route>) -> Result<Self, String> {
        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(format!("duplicate route path: {}", route.path));
            }
        }
        Ok(Self { routes })
    }

    /// Exact-match lookup; no wildcards, no prefix matching.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }
}

fn route(path: &str, label: &str, command: &[&str]) -> Route {
    Route {
        path: path.to_string(),
        label: label.to_string(),
        command: command.iter().map(ToString::to_string).collect(),
    }
}

/// Default route set used when the config file defines no `[[routes]]`.
///
/// The union of the paths served by the fixture variants.
pub fn builtin_routes() -> Vec<Route> {
    vec![
        route("/", "Ascii", &["ascii", "d"]),
        route("/jq", "Jq", &["jq", "--version"]),
        route("/bosh", "BOSH", &["bosh2", "-v"]),
        route("/cf", "cf", &["cf", "--version"]),
        route("/zsh", "zsh", &["zsh", "--version"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact() {
        let table = RouteTable::new(builtin_routes()).unwrap();
        let route = table.lookup("/jq").unwrap();
        assert_eq!(route.label, "Jq");
        assert_eq!(route.command, vec!["jq", "--version"]);
    }

    #[test]
    fn test_lookup_no_prefix_match() {
        let table = RouteTable::new(builtin_routes()).unwrap();
        assert!(table.lookup("/jq/extra").is_none());
        assert!(table.lookup("/j").is_none());
        assert!(table.lookup("/unknown").is_none());
    }

    #[test]
    fn test_root_path_is_a_route() {
        let table = RouteTable::new(builtin_routes()).unwrap();
        assert_eq!(table.lookup("/").unwrap().label, "Ascii");
    }

    #[test]
    fn test_builtin_routes_complete() {
        let routes = builtin_routes();
        assert_eq!(routes.len(), 5);
        let table = RouteTable::new(routes).unwrap();
        for path in ["/", "/jq", "/bosh", "/cf", "/zsh"] {
            assert!(table.lookup(path).is_some(), "missing route for {path}");
        }
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let routes = vec![
            route("/a", "A", &["true"]),
            route("/b", "B", &["true"]),
            route("/a", "Again", &["false"]),
        ];
        let err = RouteTable::new(routes).unwrap_err();
        assert!(err.contains("/a"), "error should name the path: {err}");
    }

    #[test]
    fn test_routes_deserialize_from_toml() {
        let doc = r#"
            [[routes]]
            path = "/jq"
            label = "Jq"
            command = ["jq", "--version"]

            [[routes]]
            path = "/zsh"
            label = "zsh"
            command = ["zsh", "--version"]
        "#;

        #[derive(Deserialize)]
        struct Doc {
            routes: Vec<Route>,
        }

        let parsed: Doc = toml::from_str(doc).unwrap();
        assert_eq!(parsed.routes.len(), 2);
        assert_eq!(parsed.routes[0].path, "/jq");
        assert_eq!(parsed.routes[1].command, vec!["zsh", "--version"]);
    }
}
