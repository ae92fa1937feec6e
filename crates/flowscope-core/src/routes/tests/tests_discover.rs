//! Tests for route discovery in a single file

use crate::routes::{discover_routes_in_text, unwrap_handler, ApiRoute, RouteFramework};

fn summary(routes: &[ApiRoute]) -> Vec<(&str, &str, &str)> {
    routes
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str(), r.handler.as_str()))
        .collect()
}

#[test]
fn test_mux_handle_func_with_methods() {
    let src = "package main\n\nfunc routes() {\n\tmux.HandleFunc(\"/users\", GetUsersHandler).Methods(\"GET\")\n}\n";

    let routes = discover_routes_in_text(src, "main.go");

    assert_eq!(summary(&routes), vec![("GET", "/users", "GetUsersHandler")]);
    assert_eq!(routes[0].framework, RouteFramework::Mux);
    assert_eq!(routes[0].line, 4);
    assert_eq!(routes[0].file_path, "main.go");
}

#[test]
fn test_mux_methods_with_http_constants() {
    let src = "package main\n\nfunc routes(r *mux.Router) {\n\tr.HandleFunc(\"/users\", CreateUser).Methods(http.MethodPost)\n\tr.HandleFunc(\"/users\", ListUsers).Methods(http.MethodGet, http.MethodHead)\n}\n";

    let routes = discover_routes_in_text(src, "main.go");

    assert_eq!(
        summary(&routes),
        vec![
            ("POST", "/users", "CreateUser"),
            ("GET", "/users", "ListUsers"),
            ("HEAD", "/users", "ListUsers"),
        ]
    );
    assert!(routes[0].id.starts_with("POST-users-CreateUser"));
}

#[test]
fn test_mux_multiple_methods_and_handle() {
    let src = r#"
	r.HandleFunc("/items", h.Items).Methods("GET", "POST")
	r.Handle("/admin", adminHandler).Methods("DELETE")
	r.PathPrefix("/static/").Handler(http.StripPrefix("/static/", fs))
"#;

    let routes = discover_routes_in_text(src, "router.go");

    assert_eq!(
        summary(&routes),
        vec![
            ("GET", "/items", "h.Items"),
            ("POST", "/items", "h.Items"),
            ("DELETE", "/admin", "adminHandler"),
            ("ALL", "/static", "fs"),
        ]
    );
}

#[test]
fn test_rest_verbs_take_last_argument() {
    let src = r#"
	router.GET("/users/:id", auth.Required(), h.GetUser)
	router.Any("/ping", ping)
	r.Get("/orders/{id}", h.GetOrder)
	r.Post("/orders", h.CreateOrder)
"#;

    let routes = discover_routes_in_text(src, "router.go");

    assert_eq!(
        summary(&routes),
        vec![
            ("GET", "/users/:id", "h.GetUser"),
            ("ALL", "/ping", "ping"),
            ("GET", "/orders/{id}", "h.GetOrder"),
            ("POST", "/orders", "h.CreateOrder"),
        ]
    );
    assert_eq!(routes[0].framework, RouteFramework::Rest);
    assert_eq!(routes[2].framework, RouteFramework::Chi);
}

#[test]
fn test_standard_library_registrations() {
    let src = r#"
	mux := http.NewServeMux()
	mux.HandleFunc("GET /health", health)
	mux.Handle("/test", &handlers.TestHandler{Logger: log})
	http.HandleFunc("/legacy", http.HandlerFunc(legacy))
"#;

    let routes = discover_routes_in_text(src, "main.go");

    assert_eq!(
        summary(&routes),
        vec![
            ("GET", "/health", "health"),
            ("ALL", "/test", "handlers.TestHandler"),
            ("ALL", "/legacy", "legacy"),
        ]
    );
    assert!(routes.iter().all(|r| r.framework == RouteFramework::NetHttp));
}

#[test]
fn test_span_claimed_by_mux_is_not_reported_again() {
    let src = "r.HandleFunc(\"/x\", X).Methods(\"PUT\")\n";

    let routes = discover_routes_in_text(src, "a.go");

    assert_eq!(summary(&routes), vec![("PUT", "/x", "X")]);
}

#[test]
fn test_commented_out_registration_is_ignored() {
    let src = "// r.HandleFunc(\"/old\", old).Methods(\"GET\")\nr.HandleFunc(\"/new\", fresh).Methods(\"GET\")\n";

    let routes = discover_routes_in_text(src, "a.go");

    assert_eq!(summary(&routes), vec![("GET", "/new", "fresh")]);
    assert_eq!(routes[0].line, 2);
}

#[test]
fn test_multiline_registration_snippet() {
    let src = "func routes() {\n\tr.HandleFunc(\"/orders\",\n\t\th.CreateOrder,\n\t).Methods(\"POST\")\n}\n";

    let routes = discover_routes_in_text(src, "a.go");

    assert_eq!(summary(&routes), vec![("POST", "/orders", "h.CreateOrder")]);
    assert_eq!(routes[0].line, 2);
    let snippet = routes[0].snippet.as_deref().unwrap_or_default();
    assert!(snippet.contains("h.CreateOrder"));
    assert!(snippet.contains("Methods"));
}

#[test]
fn test_ids_are_deterministic() {
    let src = "r.Get(\"/a\", h.A)\nr.Get(\"/b\", h.B)\n";

    let first: Vec<String> = discover_routes_in_text(src, "a.go").into_iter().map(|r| r.id).collect();
    let second: Vec<String> = discover_routes_in_text(src, "a.go").into_iter().map(|r| r.id).collect();

    assert_eq!(first, second);
    assert_eq!(first[0], "GET-a-h-A-a-go-1");
}

#[test]
fn test_unwrap_handler() {
    assert_eq!(unwrap_handler("h.List"), "h.List");
    assert_eq!(unwrap_handler("http.HandlerFunc(h.List)"), "h.List");
    assert_eq!(unwrap_handler("auth(http.HandlerFunc(h.List))"), "h.List");
    assert_eq!(unwrap_handler("&handlers.Test{Log: l, Db: d}"), "handlers.Test");
    assert_eq!(unwrap_handler("h.Make()"), "h.Make");
    assert_eq!(unwrap_handler("func(w http.ResponseWriter, r *http.Request) {}"), "anonymous");
}

#[test]
fn test_no_routes_in_plain_code() {
    let src = "package main\n\nfunc main() {\n\tv := r.Header.Get(\"X-Id\")\n\t_ = v\n}\n";

    assert!(discover_routes_in_text(src, "main.go").is_empty());
}
