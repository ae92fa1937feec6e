//! Tests for route path and method normalization

use rstest::rstest;

use crate::routes::{normalize_method, normalize_path, path_params, route_id, split_method_pattern};

#[rstest]
#[case("GET", Some("GET"))]
#[case("\"post\"", Some("POST"))]
#[case(" Delete ", Some("DELETE"))]
#[case("Any", Some("ALL"))]
#[case("all", Some("ALL"))]
#[case("http.MethodPost", Some("POST"))]
#[case(" http.MethodDelete", Some("DELETE"))]
#[case("nethttp.MethodGet", Some("GET"))]
#[case("http.MethodFetch", None)]
#[case("FETCH", None)]
#[case("", None)]
fn test_normalize_method(#[case] raw: &str, #[case] expected: Option<&str>) {
    assert_eq!(normalize_method(raw).as_deref(), expected);
}

#[rstest]
#[case("/users", "/users")]
#[case("users/", "/users")]
#[case("//api//v1/", "/api/v1")]
#[case("", "/")]
#[case("/", "/")]
fn test_normalize_path(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_path(raw), expected);
}

#[test]
fn test_split_method_pattern() {
    assert_eq!(split_method_pattern("GET /users/{id}"), (Some("GET".to_string()), "/users/{id}"));
    assert_eq!(split_method_pattern("/users"), (None, "/users"));
    assert_eq!(split_method_pattern("example.com /x"), (None, "example.com /x"));
}

#[test]
fn test_path_params_both_styles() {
    assert_eq!(path_params("/users/{id}/posts/{postID:[0-9]+}"), vec!["id", "postID"]);
    assert_eq!(path_params("/users/:id/files/:name"), vec!["id", "name"]);
    assert!(path_params("/health").is_empty());
}

#[test]
fn test_route_id_is_stable_and_hyphenated() {
    let id = route_id("GET", "/users/{id}", "h.GetUser", "api/router.go", 12);

    assert_eq!(id, "GET-users-id-h-GetUser-api-router-go-12");
    assert_eq!(id, route_id("GET", "/users/{id}", "h.GetUser", "api/router.go", 12));
}
