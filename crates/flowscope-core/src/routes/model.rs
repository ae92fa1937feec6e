//! Route model types

use serde::{Deserialize, Serialize};

/// Method recorded for registrations that accept every method
pub const METHOD_ALL: &str = "ALL";

/// Registration style that produced a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteFramework {
    /// gorilla/mux style `HandleFunc(...).Methods(...)` and `PathPrefix`
    #[serde(rename = "mux")]
    Mux,
    /// gin/echo style `GET(path, handler)`
    #[serde(rename = "rest")]
    Rest,
    /// chi/fiber style `Get(path, handler)`
    #[serde(rename = "chi")]
    Chi,
    /// Standard library `HandleFunc(path, handler)`
    #[serde(rename = "net/http")]
    NetHttp,
}

impl std::fmt::Display for RouteFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mux => "mux",
            Self::Rest => "rest",
            Self::Chi => "chi",
            Self::NetHttp => "net/http",
        };
        write!(f, "{s}")
    }
}

/// A discovered HTTP route registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRoute {
    /// Stable key derived from method, path, handler, file and line
    pub id: String,
    /// Upper-case HTTP method or [`METHOD_ALL`]
    pub method: String,
    /// Normalized path
    pub path: String,
    /// Handler reference as written, with adapters unwrapped
    pub handler: String,
    /// Declaring file, relative to the project root
    pub file_path: String,
    /// 1-indexed line of the registration
    pub line: u32,
    pub snippet: Option<String>,
    pub framework: RouteFramework,
}

impl ApiRoute {
    /// Bare function name of the handler (`h.GetUser` -> `GetUser`)
    #[must_use]
    pub fn handler_name(&self) -> &str {
        self.handler.rsplit('.').next().unwrap_or(&self.handler)
    }
}
