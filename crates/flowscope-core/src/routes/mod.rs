//! Routes module: HTTP route discovery
//!
//! Recognizes route registrations of several Go router styles by pattern
//! alone; imports are not consulted.

mod discover;
pub mod model;
pub mod path;

pub use discover::{
    dedup_routes, discover_project_routes, discover_routes_in_text, unwrap_handler,
    ANONYMOUS_HANDLER,
};
pub use model::{ApiRoute, RouteFramework, METHOD_ALL};
pub use path::{normalize_method, normalize_path, path_params, route_id, split_method_pattern};

#[cfg(test)]
mod tests;
