//! Self-describing endpoint catalogue served at `/docs`.
//!
//! The catalogue is static; only `base_url` is derived from the request.

use axum::extract::State;
use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use tratics_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::query::ApiPath;
use crate::response::ApiResponse;
use crate::state::AppState;

/// One documented route.
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    /// `"none"`, `"optional"`, `"user"` or `"admin"`.
    pub authentication: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    pub body: &'static [&'static str],
    #[serde(skip_serializing_if = "is_empty")]
    pub query: &'static [&'static str],
}

fn is_empty(list: &&[&str]) -> bool {
    list.is_empty()
}

/// A group of routes sharing a prefix.
#[derive(Debug)]
pub struct Section {
    pub slug: &'static str,
    pub name: &'static str,
    pub prefix: &'static str,
    pub description: &'static str,
    pub endpoints: &'static [EndpointDoc],
}

#[derive(Debug, Serialize)]
pub struct SectionSummary {
    pub name: &'static str,
    pub path: String,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocsIndex {
    pub title: &'static str,
    pub version: &'static str,
    pub base_url: String,
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, Serialize)]
pub struct SectionDocs {
    pub section: &'static str,
    pub base_url: String,
    pub description: &'static str,
    pub endpoints: &'static [EndpointDoc],
}

const fn endpoint(
    method: &'static str,
    path: &'static str,
    description: &'static str,
    authentication: &'static str,
) -> EndpointDoc {
    EndpointDoc {
        method,
        path,
        description,
        authentication,
        body: &[],
        query: &[],
    }
}

const LIST_KEY_FIELDS: &[&str] = &[
    "list_type: \"watchlist\" | \"favorite\" (required)",
    "item_type: \"movie\" | \"series\" | \"episode\" (required)",
    "wp_post_id: positive integer (required)",
];

pub static SECTIONS: &[Section] = &[
    Section {
        slug: "auth",
        name: "Authentication",
        prefix: "/api/auth",
        description: "Registration, login, logout and session refresh via httpOnly cookies",
        endpoints: &[
            EndpointDoc {
                body: &[
                    "email: string (required)",
                    "username: string (required)",
                    "password: string (required, min 8 characters)",
                ],
                ..endpoint("POST", "/register", "Create a user account", "none")
            },
            EndpointDoc {
                body: &["email: string (required)", "password: string (required)"],
                ..endpoint(
                    "POST",
                    "/login",
                    "Verify credentials and set access_token and refresh_token cookies",
                    "none",
                )
            },
            endpoint(
                "POST",
                "/logout",
                "Revoke the caller's sessions and clear both cookies; always 200",
                "optional",
            ),
            endpoint(
                "POST",
                "/refresh",
                "Rotate the refresh_token cookie and issue a new access token",
                "optional",
            ),
            endpoint("GET", "/me", "Current user", "user"),
        ],
    },
    Section {
        slug: "me",
        name: "Profile and lists",
        prefix: "/api/me",
        description: "The caller's profile, watchlist and favorites",
        endpoints: &[
            endpoint("GET", "/", "Profile of the caller", "user"),
            EndpointDoc {
                query: &["list_type (optional)", "item_type (optional)"],
                ..endpoint("GET", "/lists", "List memberships, newest first", "user")
            },
            EndpointDoc {
                body: &[
                    "list_type: \"watchlist\" | \"favorite\" (required)",
                    "item_type: \"movie\" | \"series\" | \"episode\" (required)",
                    "wp_post_id: positive integer (required)",
                    "wp_slug: string (required)",
                ],
                ..endpoint("POST", "/lists", "Add an item; repeated adds return the same row", "user")
            },
            EndpointDoc {
                body: LIST_KEY_FIELDS,
                ..endpoint("DELETE", "/lists", "Remove an item; 404 when absent", "user")
            },
            EndpointDoc {
                query: LIST_KEY_FIELDS,
                ..endpoint("GET", "/lists/check", "Whether an item is in a list", "user")
            },
        ],
    },
    Section {
        slug: "admin",
        name: "Administration",
        prefix: "/api/admin",
        description: "User management and analytics",
        endpoints: &[
            endpoint("GET", "/dashboard", "Headline user, list and view counts", "admin"),
            EndpointDoc {
                query: &["page (default 1)", "limit (default 50, max 100)"],
                ..endpoint("GET", "/users", "Paginated users", "admin")
            },
            endpoint("GET", "/users/{id}", "One user", "admin"),
            EndpointDoc {
                body: &[
                    "email: string",
                    "username: string | null",
                    "role: \"user\" | \"admin\"",
                    "is_active: boolean",
                ],
                ..endpoint("PATCH", "/users/{id}", "Update selected fields", "admin")
            },
            endpoint("DELETE", "/users/{id}", "Delete a user other than the caller", "admin"),
            endpoint("GET", "/stats/views", "Page-view analytics", "admin"),
            endpoint("GET", "/stats/users", "User analytics", "admin"),
        ],
    },
    Section {
        slug: "views",
        name: "Page views",
        prefix: "/api/views",
        description: "Page-view tracking for anonymous and signed-in visitors",
        endpoints: &[EndpointDoc {
            body: &[
                "page_type: string (required)",
                "page_slug: string",
                "wp_post_id: positive integer",
                "referer: string",
            ],
            ..endpoint("POST", "/", "Record one page view", "optional")
        }],
    },
    Section {
        slug: "health",
        name: "Health check",
        prefix: "",
        description: "Service and database status",
        endpoints: &[
            endpoint("GET", "/health", "Service version and database reachability", "none"),
            endpoint("GET", "/", "Service banner", "none"),
        ],
    },
];

/// `scheme://host` of the request, or empty when there is no `Host` header.
///
/// `x-forwarded-proto` is honoured only when `TRUST_PROXY` is enabled.
fn base_url(headers: &HeaderMap, trust_proxy: bool) -> String {
    let Some(host) = headers.get(HOST).and_then(|v| v.to_str().ok()) else {
        return String::new();
    };
    let scheme = trust_proxy
        .then(|| headers.get("x-forwarded-proto"))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .filter(|v| *v == "https")
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

/// GET /docs
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Json<ApiResponse<DocsIndex>> {
    let base_url = base_url(&headers, state.config.trust_proxy);
    Json(ApiResponse::data(DocsIndex {
        title: "Tratics API Documentation",
        version: env!("CARGO_PKG_VERSION"),
        sections: SECTIONS
            .iter()
            .map(|s| SectionSummary {
                name: s.name,
                path: format!("{base_url}/docs/{}", s.slug),
                description: s.description,
            })
            .collect(),
        base_url,
    }))
}

/// GET /docs/{section}
async fn section(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<Json<ApiResponse<SectionDocs>>> {
    let section = SECTIONS
        .iter()
        .find(|s| s.slug == slug)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound("Documentation section not found".into()))
        })?;

    Ok(Json(ApiResponse::data(SectionDocs {
        section: section.name,
        base_url: format!(
            "{}{}",
            base_url(&headers, state.config.trust_proxy),
            section.prefix
        ),
        description: section.description,
        endpoints: section.endpoints,
    })))
}

/// Mount the catalogue at the root level.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/docs", get(index))
        .route("/docs/{section}", get(section))
}
