//! Tests for definition and call-site extraction

use rstest::rstest;

use crate::graph::{extract_function_calls, extract_functions, package_name, scan_calls};

const HANDLERS: &str = r#"package api

var router = NewRouter()

func (h *Handler) GetUser(w http.ResponseWriter, r *http.Request) {
	id := r.URL.Query().Get("id")
	user, err := h.service.FindUser(id)
	if err != nil {
		http.Error(w, "lookup(failed)", 500)
		return
	}
	writeJSON(w, user)
}

func writeJSON(w http.ResponseWriter, v any) {
	json.NewEncoder(w).Encode(v)
}

func ping() { logPing() }
"#;

fn names(line: &str) -> Vec<String> {
    scan_calls(line)
        .into_iter()
        .map(|s| match s.qualifier {
            Some(q) => format!("{q}.{}", s.name),
            None => s.name,
        })
        .collect()
}

#[rstest]
#[case("user, err := h.service.GetUser(ctx, id)", vec!["service.GetUser"])]
#[case("fmt.Println(\"x\")", vec![])]
#[case("if len(items) > 0 && check(items) {", vec!["check"])]
#[case("s := \"format(now)\"", vec![])]
#[case("b := x.Build().Run()", vec!["x.Build"])]
#[case("save(load(id)) // retry()", vec!["save", "load"])]
#[case("data := []byte(raw)", vec![])]
fn test_scan_calls(#[case] line: &str, #[case] expected: Vec<&str>) {
    assert_eq!(names(line), expected);
}

#[test]
fn test_package_name() {
    assert_eq!(package_name(HANDLERS), "api");
    assert_eq!(package_name("func main() {}"), "");
}

#[test]
fn test_extract_functions_in_order() {
    let functions = extract_functions(HANDLERS, "api/handlers.go", "api");

    let found: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(found, vec!["GetUser", "writeJSON", "ping"]);
    assert!(functions.windows(2).all(|w| w[0].line <= w[1].line));

    let get_user = &functions[0];
    assert_eq!(get_user.receiver.as_deref(), Some("Handler"));
    assert_eq!(get_user.line, 5);
    assert_eq!(get_user.end_line, 13);
    assert_eq!(get_user.parameters.len(), 2);
    assert_eq!(get_user.file_path, "api/handlers.go");
    assert_eq!(get_user.package, "api");
}

#[test]
fn test_extract_function_calls_attributes_callers() {
    let calls = extract_function_calls(HANDLERS, "api/handlers.go", "api");

    let pairs: Vec<(&str, &str, u32)> = calls
        .iter()
        .map(|c| (c.caller.as_str(), c.callee.as_str(), c.line))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("GetUser", "FindUser", 7),
            ("GetUser", "writeJSON", 12),
            ("ping", "logPing", 19),
        ]
    );
    assert_eq!(calls[0].qualifier.as_deref(), Some("service"));
    assert!(calls.iter().all(|c| c.target_file.is_none()));
}

#[test]
fn test_calls_outside_functions_are_dropped() {
    let calls = extract_function_calls("package main\n\nvar x = compute()\n", "main.go", "main");

    assert!(calls.is_empty());
}
